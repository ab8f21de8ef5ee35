//! Invoking the document converter.

use std::ffi::OsString;
use std::path::Path;

use anyhow::{Result, bail};

use super::Invocation;

pub const DEFAULT_CONVERTER: &str = "pandoc";
pub const INPUT_PLACEHOLDER: &str = "{input}";
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Standalone conversion of `{input}` into `{output}`.
pub fn default_args() -> Vec<String> {
    ["-s", INPUT_PLACEHOLDER, "-o", OUTPUT_PLACEHOLDER]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterCommand {
    program: String,
    args: Vec<String>,
}

impl ConverterCommand {
    pub fn new(program: &str, args: Vec<String>) -> Result<Self> {
        if program.trim().is_empty() {
            bail!("converter program is empty");
        }
        for placeholder in [INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER] {
            if !args.iter().any(|arg| arg.contains(placeholder)) {
                bail!(
                    "converter arguments {:?} never mention {}",
                    args,
                    placeholder
                );
            }
        }
        Ok(Self {
            program: program.trim().to_string(),
            args,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn invocation(&self, input: &Path, output: &Path) -> Invocation {
        Invocation {
            program: self.program.clone(),
            args: self
                .args
                .iter()
                .map(|arg| substitute(arg, input, output))
                .collect(),
        }
    }
}

impl Default for ConverterCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_CONVERTER.to_string(),
            args: default_args(),
        }
    }
}

/// Replace placeholders in one argument, keeping paths as `OsStr`.
fn substitute(arg: &str, input: &Path, output: &Path) -> OsString {
    let mut out = OsString::new();
    let mut rest = arg;
    loop {
        let next = [(INPUT_PLACEHOLDER, input), (OUTPUT_PLACEHOLDER, output)]
            .into_iter()
            .filter_map(|(placeholder, path)| {
                rest.find(placeholder).map(|at| (at, placeholder, path))
            })
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, placeholder, path)) => {
                out.push(&rest[..at]);
                out.push(path.as_os_str());
                rest = &rest[at + placeholder.len()..];
            }
            None => {
                out.push(rest);
                return out;
            }
        }
    }
}
