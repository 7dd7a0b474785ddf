use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    process::Command,
};

use log::debug;
use thiserror::Error;

pub(crate) const DEFAULT_START_BRANCH: &str = "master";

#[derive(Error, Debug)]
pub(crate) enum VcsError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed ({status}){}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// The version control operations blogtool needs.
pub(crate) trait Vcs {
    /// Root directory of the repository containing the working directory.
    fn toplevel(&self) -> Result<PathBuf, VcsError>;
    /// Creates `branch` from `start` and switches to it.
    fn create_branch(&self, branch: &str, start: &str) -> Result<(), VcsError>;
    fn add_files(&self, paths: &[&Path]) -> Result<(), VcsError>;
    fn commit(&self, message: &str) -> Result<(), VcsError>;
}

/// Runs the `git` binary found on `PATH`.
#[derive(Debug, Default)]
pub(crate) struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    fn run<I, S>(&self, args: I) -> Result<String, VcsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        let command = format!("{cmd:?}");
        debug!("running {command}");

        let output = cmd.output().map_err(|source| VcsError::Spawn {
            command: command.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(VcsError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// `git add -- <paths>`; the `--` keeps paths such as `-hello/index.md`
/// from being read as options.
fn add_args<'a>(paths: &[&'a Path]) -> Vec<&'a OsStr> {
    let mut args = vec![OsStr::new("add"), OsStr::new("--")];
    args.extend(paths.iter().map(|p| p.as_os_str()));
    args
}

impl Vcs for GitCli {
    fn toplevel(&self) -> Result<PathBuf, VcsError> {
        let out = self.run(["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(out.trim_end_matches(['\n', '\r'])))
    }

    fn create_branch(&self, branch: &str, start: &str) -> Result<(), VcsError> {
        let start = if start.is_empty() {
            DEFAULT_START_BRANCH
        } else {
            start
        };
        self.run(["checkout", "-b", branch, start]).map(drop)
    }

    fn add_files(&self, paths: &[&Path]) -> Result<(), VcsError> {
        self.run(add_args(paths)).map(drop)
    }

    fn commit(&self, message: &str) -> Result<(), VcsError> {
        self.run(["commit", "-m", message]).map(drop)
    }
}
