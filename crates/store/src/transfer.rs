//! Delta-synchronization of the source tree into a new snapshot
//!
//! The source is mirrored under the snapshot using its absolute path, so
//! backing up `/home/me` into `dest/20180508-070409` lands the files in
//! `dest/20180508-070409/home/me/`. Unchanged files are hard-linked against
//! the same location inside the previous snapshot when one is available.

use crate::TransferError;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::process::Stdio;

/// Default transfer program
pub const DEFAULT_PROGRAM: &str = "rsync";

/// Default passthrough arguments
pub const DEFAULT_ARGS: &str = "-a";

/// One invocation of the external sync tool
#[derive(Debug, Clone)]
pub struct Transfer {
    program: String,
    args: Vec<String>,
    source: PathBuf,
    snapshot_dir: PathBuf,
    link_dest: Option<PathBuf>,
}

impl Transfer {
    /// Copy `source` into `snapshot_dir` with `rsync -a`
    pub fn new(source: impl Into<PathBuf>, snapshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: vec![DEFAULT_ARGS.to_string()],
            source: source.into(),
            snapshot_dir: snapshot_dir.into(),
            link_dest: None,
        }
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Replace the passthrough arguments with a shell-style argument string
    pub fn extra_args(mut self, raw: &str) -> Result<Self, TransferError> {
        self.args = shlex::split(raw).ok_or_else(|| TransferError::InvalidArgs(raw.to_string()))?;
        Ok(self)
    }

    /// Hard-link unchanged files against the snapshot behind `previous`
    ///
    /// `previous` is the root of the earlier snapshot (usually the "latest"
    /// alias); the source's relative path is appended to it.
    pub fn link_from(mut self, previous: Option<&Path>) -> Self {
        self.link_dest = previous.map(|root| root.join(self.source_relative()));
        self
    }

    /// Source path without its root, as mirrored inside the snapshot
    pub fn source_relative(&self) -> PathBuf {
        self.source
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect()
    }

    /// Directory the source tree is copied into
    pub fn target_dir(&self) -> PathBuf {
        self.snapshot_dir.join(self.source_relative())
    }

    /// Full argument vector passed to the program
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push("--delete".into());
        args.push(with_trailing_slash(&self.source));

        if let Some(link_dest) = &self.link_dest {
            let mut flag = OsString::from("--link-dest=");
            flag.push(with_trailing_slash(link_dest));
            args.push(flag);
        }

        args.push(self.target_dir().into_os_string());
        args
    }

    /// Printable, shell-quoted rendering of the invocation
    pub fn command_line(&self) -> String {
        std::iter::once(OsString::from(&self.program))
            .chain(self.args())
            .map(|arg| {
                let arg = arg.to_string_lossy().into_owned();
                match shlex::try_quote(&arg) {
                    Ok(quoted) => quoted.into_owned(),
                    Err(_) => arg,
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Create the target directory and run the program to completion
    ///
    /// The tool's stdout is passed through to ours; stderr is captured and
    /// attached to the error when the tool exits unsuccessfully.
    pub async fn run(&self) -> Result<(), TransferError> {
        let target = self.target_dir();
        tokio::fs::create_dir_all(&target)
            .await
            .map_err(|source| TransferError::Prepare {
                path: target.clone(),
                source,
            })?;

        tracing::debug!("Running {}", self.command_line());

        let output = tokio::process::Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| TransferError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(TransferError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

fn with_trailing_slash(path: &Path) -> OsString {
    let mut s = path.as_os_str().to_os_string();
    if !s.to_string_lossy().ends_with('/') {
        s.push("/");
    }
    s
}
