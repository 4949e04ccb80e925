//! zsh-llm-suggestions-ollama - the ollama backend for zsh-llm-suggestions.
//!
//! Called by the zsh plugin with a mode argument and the user's buffer on
//! stdin. Prints a shell command (`generate`) or an explanation (`explain`)
//! produced by a local ollama profile. `setup` creates those profiles.

mod config;
mod dispatch;
mod error;
mod render;
mod runner;

use clap::Parser;
use dispatch::{Io, Options};
use render::Highlighter;
use runner::OllamaCli;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "zsh-llm-suggestions-ollama")]
#[command(author, version, about = "Generate and explain shell commands with a local ollama model")]
#[command(long_about = "Generate and explain shell commands with a local ollama model.\n\nReads the prompt from stdin. Modes: setup, generate, explain.")]
struct Cli {
    /// One of: setup, generate, explain
    #[arg(value_name = "MODE", allow_hyphen_values = true)]
    mode: Option<String>,

    /// Directory containing the profile modelfiles (setup only)
    #[arg(long, value_name = "DIR")]
    modelfile_dir: Option<PathBuf>,

    /// Runner executable (default: ollama)
    #[arg(long, value_name = "PROGRAM")]
    runner: Option<String>,

    /// Print explanations without syntax highlighting
    #[arg(long)]
    no_highlight: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Effective settings after applying CLI flags over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    runner_program: String,
    modelfile_dir: Option<PathBuf>,
    /// Whether to try acquiring the highlighter.
    highlight: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &config::Config) -> Self {
        let runner_program = cli
            .runner
            .clone()
            .unwrap_or_else(|| config.runner.program.clone());
        let modelfile_dir = cli
            .modelfile_dir
            .clone()
            .or_else(|| config.setup.modelfile_dir.clone());
        // Only explain output is highlighted; skip loading grammars otherwise
        let highlight = cli.mode.as_deref() == Some("explain")
            && config.highlight.enabled
            && !cli.no_highlight;

        Self {
            runner_program,
            modelfile_dir,
            highlight,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            return ExitCode::from(dispatch::EXIT_FAILURE);
        }
    };

    let settings = Settings::resolve(&cli, &config);
    let runner = OllamaCli::new(settings.runner_program);
    let modelfile_dir = settings.modelfile_dir;

    let highlighter = if settings.highlight {
        Highlighter::acquire(&config.highlight.theme)
    } else {
        None
    };
    debug!("Highlighter available: {}", highlighter.is_some());

    let env = |key: &str| std::env::var(key).ok();
    let mut io = Io {
        stdin: std::io::stdin().lock(),
        stdout: std::io::stdout().lock(),
        stderr: std::io::stderr().lock(),
        env: &env,
    };
    let options = Options {
        modelfile_dir: modelfile_dir.as_deref(),
        highlighter: highlighter.as_ref(),
    };

    ExitCode::from(dispatch::run(cli.mode.as_deref(), &mut io, &runner, &options))
}

/// Log to stderr so stdout stays clean for the shell widget.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "zsh_llm_suggestions_ollama=debug"
    } else {
        "zsh_llm_suggestions_ollama=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
