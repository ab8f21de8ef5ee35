//! inkshed
//!
//! Start a freewriting session from a label: seed `<prefix>.<label>.md`
//! with a title and author line, open it in an editor, then convert it to
//! `<prefix>.<label>.docx`.
//!
//! This library provides:
//! - Configuration from the command line, a TOML file and built-in defaults
//! - Label validation and file naming
//! - Template rendering
//! - Editor and converter invocation

pub mod config;
pub mod error;
pub mod label;
pub mod launcher;
pub mod template;
pub mod tools;

// Re-exports for clean public API
pub use config::{Args, Config};
pub use error::{InkshedError, Tool};
pub use label::{DocumentPaths, Label};
pub use launcher::{Launcher, Report};
pub use tools::{Invocation, ProcessRunner, ToolRunner, ToolStatus};
