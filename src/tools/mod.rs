//! External collaborators: the editor and the document converter.
//!
//! Both are opaque programs. The launcher only builds their command lines
//! and looks at their exit status, through the [`ToolRunner`] seam.

pub mod converter;
pub mod editor;

pub use converter::ConverterCommand;
pub use editor::EditorCommand;

use std::ffi::OsString;
use std::io;
use std::process::ExitStatus;

use tokio::process::Command;

/// A fully built command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

/// Exit status of a finished tool; `code` is `None` when killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ToolStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs an invocation to completion.
///
/// `Err` means the program could not be started; a program that ran and
/// failed is reported through [`ToolStatus`].
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<ToolStatus>;
}

/// Spawns real child processes sharing the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<ToolStatus> {
        log::debug!("running {} {:?}", invocation.program, invocation.args);

        // Inherited stdio, so an interactive editor owns the terminal.
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .await?;

        log::debug!("{} exited with {:?}", invocation.program, status.code());
        Ok(status.into())
    }
}
