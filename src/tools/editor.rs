//! Choosing and invoking the interactive editor.

use std::ffi::OsString;
use std::path::Path;

use anyhow::{Result, bail};

use super::Invocation;

/// Used when nothing is configured and neither `$VISUAL` nor `$EDITOR` is set.
pub const FALLBACK_EDITOR: &str = "vi";

/// Editors that get `+norm G` so the cursor starts below the template.
const JUMP_TO_END_EDITORS: &[&str] = &["vim", "nvim"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// Parse an editor command such as `vim` or `code --wait`.
    ///
    /// Words are split on whitespace; no shell quoting is interpreted.
    pub fn parse(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let Some(program) = words.next() else {
            bail!("editor command is empty");
        };
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Resolve the editor from the configured value, then `$VISUAL`, then `$EDITOR`.
    pub fn resolve(configured: Option<&str>) -> Result<Self> {
        Self::from_sources(
            configured,
            std::env::var("VISUAL").ok().as_deref(),
            std::env::var("EDITOR").ok().as_deref(),
        )
    }

    pub fn from_sources(
        configured: Option<&str>,
        visual: Option<&str>,
        editor: Option<&str>,
    ) -> Result<Self> {
        let chosen = [configured, visual, editor]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.trim().is_empty())
            .unwrap_or(FALLBACK_EDITOR);
        Self::parse(chosen)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn invocation(&self, file: &Path) -> Invocation {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push(file.as_os_str().to_os_string());

        let name = Path::new(&self.program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.program);
        if JUMP_TO_END_EDITORS.contains(&name) {
            args.push(OsString::from("+norm G"));
        }

        Invocation {
            program: self.program.clone(),
            args,
        }
    }
}
