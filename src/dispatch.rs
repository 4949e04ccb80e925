//! Mode dispatch: the whole setup/generate/explain flow.
//!
//! Everything the dispatcher touches (stdin, environment, runner, output
//! streams) is passed in, so `main` only wires up the real process handles.

use crate::config::{self, PROFILES};
use crate::error::{Error, Result};
use crate::render::{self, Highlighter};
use crate::runner::Runner;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Exit code for success.
pub const EXIT_OK: u8 = 0;
/// Exit code for any failure.
pub const EXIT_FAILURE: u8 = 1;

/// What the helper was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create the ollama profiles from their modelfiles.
    Setup,
    /// Turn a description into a shell command.
    Generate,
    /// Explain a shell command.
    Explain,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "setup" => Ok(Mode::Setup),
            "generate" => Ok(Mode::Generate),
            "explain" => Ok(Mode::Explain),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// Process handles and collaborators for one invocation.
pub struct Io<'a, R, O, E> {
    pub stdin: R,
    pub stdout: O,
    pub stderr: E,
    pub env: &'a dyn Fn(&str) -> Option<String>,
}

/// Options that only matter to some modes.
#[derive(Default)]
pub struct Options<'a> {
    pub modelfile_dir: Option<&'a Path>,
    pub highlighter: Option<&'a Highlighter>,
}

/// Run one invocation and return the process exit code.
pub fn run<R, O, E>(
    mode: Option<&str>,
    io: &mut Io<'_, R, O, E>,
    runner: &dyn Runner,
    options: &Options<'_>,
) -> u8
where
    R: Read,
    O: Write,
    E: Write,
{
    let mode = match mode {
        Some(value) => match value.parse::<Mode>() {
            Ok(mode) => mode,
            Err(_) => return invalid_mode(&mut io.stderr, value),
        },
        None => return invalid_mode(&mut io.stderr, "<none>"),
    };
    debug!("Mode: {:?}", mode);

    match mode {
        Mode::Setup => setup(io, runner, options.modelfile_dir),
        Mode::Generate | Mode::Explain => suggest(mode, io, runner, options.highlighter),
    }
}

/// Create each profile in order, stopping at the first failure.
fn setup<R, O, E>(io: &mut Io<'_, R, O, E>, runner: &dyn Runner, dir: Option<&Path>) -> u8
where
    O: Write,
    E: Write,
{
    for profile in &PROFILES {
        let modelfile = profile.modelfile_path(dir);
        if let Err(e) = runner.create(profile.name, &modelfile) {
            let header = format!("ERROR: Failed to setup {} ollama profile.", profile.name);
            return report(&mut io.stderr, &header, &e);
        }
        if writeln!(io.stdout, "Successfully generated {} ollama profile.", profile.name).is_err() {
            return EXIT_FAILURE;
        }
    }
    EXIT_OK
}

/// Shared generate/explain flow: resolve model, read prompt, run, render.
fn suggest<R, O, E>(
    mode: Mode,
    io: &mut Io<'_, R, O, E>,
    runner: &dyn Runner,
    highlighter: Option<&Highlighter>,
) -> u8
where
    R: Read,
    O: Write,
    E: Write,
{
    let model = match mode {
        Mode::Explain => config::resolve(io.env, config::EXPLAIN_MODEL_ENV, config::EXPLAIN_PROFILE),
        _ => config::resolve(io.env, config::GENERATE_MODEL_ENV, config::GENERATE_PROFILE),
    };

    let prompt = match read_prompt(&mut io.stdin) {
        Ok(prompt) => prompt,
        Err(e) => return report(&mut io.stderr, "ERROR: something went wrong:", &e),
    };

    let output = match runner.run(&model, &prompt) {
        Ok(output) => output,
        Err(e) => {
            let _ = writeln!(io.stderr, "ERROR: something went wrong:\n{}", e.diagnostic().trim());
            return EXIT_FAILURE;
        }
    };

    let written = match mode {
        Mode::Explain => write!(io.stdout, "{}", render::render_explanation(&output, highlighter)),
        _ => writeln!(io.stdout, "{}", render::strip_fences(&output)),
    };
    match written.and_then(|_| io.stdout.flush()) {
        Ok(()) => EXIT_OK,
        Err(_) => EXIT_FAILURE,
    }
}

/// Read all of stdin and trim surrounding whitespace.
fn read_prompt<R: Read>(stdin: &mut R) -> Result<String> {
    let mut prompt = String::new();
    stdin.read_to_string(&mut prompt).map_err(Error::Stdin)?;
    Ok(prompt.trim().to_string())
}

fn invalid_mode<E: Write>(stderr: &mut E, value: &str) -> u8 {
    let _ = writeln!(
        stderr,
        "ERROR: something went wrong in zsh-llm-suggestions, please report a bug. Got unknown mode: {}",
        value
    );
    EXIT_FAILURE
}

fn report<E: Write>(stderr: &mut E, header: &str, err: &Error) -> u8 {
    let _ = writeln!(stderr, "{}", header);
    let _ = writeln!(stderr, "{}", err.diagnostic());
    EXIT_FAILURE
}
