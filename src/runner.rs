//! External model runner.
//!
//! The runner is the `ollama` CLI, invoked synchronously with captured output.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

/// Operations the dispatcher needs from the model runtime.
pub trait Runner {
    /// Create a named profile from a definition file.
    fn create(&self, name: &str, modelfile: &Path) -> Result<()>;

    /// Run a profile against a prompt and return the generated text.
    fn run(&self, model: &str, prompt: &str) -> Result<String>;
}

/// Runner backed by the `ollama` command-line tool.
pub struct OllamaCli {
    program: String,
}

impl OllamaCli {
    /// Create a runner invoking `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn create_args(name: &str, modelfile: &Path) -> Vec<OsString> {
        vec![
            "create".into(),
            name.into(),
            "--file".into(),
            modelfile.as_os_str().to_owned(),
        ]
    }

    fn run_args(model: &str, prompt: &str) -> Vec<OsString> {
        vec!["run".into(), model.into(), prompt.into()]
    }

    /// Spawn the program, wait for it, and capture both streams.
    fn execute(&self, args: &[OsString]) -> Result<CommandOutput> {
        debug!(
            "Running {} {}",
            self.program,
            args.first().map(|a| a.to_string_lossy()).unwrap_or_default()
        );

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!("{} finished with {}", self.program, output.status);

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Turn a non-zero exit into an error carrying the program's stderr.
    fn check(&self, output: CommandOutput) -> Result<String> {
        if output.success {
            Ok(output.stdout)
        } else {
            Err(Error::CommandFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: output.stderr,
            })
        }
    }
}

impl Runner for OllamaCli {
    fn create(&self, name: &str, modelfile: &Path) -> Result<()> {
        let output = self.execute(&Self::create_args(name, modelfile))?;
        self.check(output).map(|_| ())
    }

    fn run(&self, model: &str, prompt: &str) -> Result<String> {
        let output = self.execute(&Self::run_args(model, prompt))?;
        self.check(output)
    }
}
