//! The inkshed session: name, write, edit, convert.

use std::fs;

use crate::config::Config;
use crate::error::{InkshedError, Result, Tool};
use crate::label::{DocumentPaths, Label};
use crate::template;
use crate::tools::{EditorCommand, Invocation, ToolRunner};

/// What a successful session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub paths: DocumentPaths,
    /// False when conversion was switched off
    pub converted: bool,
}

pub struct Launcher<R> {
    config: Config,
    runner: R,
}

impl<R: ToolRunner> Launcher<R> {
    pub fn new(config: Config, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one session for `label`.
    ///
    /// The converter only runs after the editor exits successfully. The
    /// first failing step ends the session; nothing already written is
    /// removed.
    pub async fn run(&self, label: &Label) -> Result<Report> {
        let editor = EditorCommand::resolve(self.config.editor.as_deref())?;
        let paths = self.config.paths(label);

        self.write_template(label, &paths)?;

        self.run_tool(Tool::Editor, &editor.invocation(&paths.source))
            .await?;

        if !self.config.convert {
            log::info!("conversion disabled, leaving {}", paths.source.display());
            return Ok(Report {
                paths,
                converted: false,
            });
        }

        let converter = self
            .config
            .converter
            .invocation(&paths.source, &paths.output);
        self.run_tool(Tool::Converter, &converter).await?;

        log::info!("wrote {}", paths.output.display());
        Ok(Report {
            paths,
            converted: true,
        })
    }

    /// Seed the source file, replacing whatever was there.
    fn write_template(&self, label: &Label, paths: &DocumentPaths) -> Result<()> {
        let contents = template::render(&self.config.title_for(label), &self.config.author);
        fs::write(&paths.source, contents).map_err(|source| InkshedError::WriteTemplate {
            path: paths.source.clone(),
            source,
        })?;
        log::info!("wrote template to {}", paths.source.display());
        Ok(())
    }

    async fn run_tool(&self, tool: Tool, invocation: &Invocation) -> Result<()> {
        log::info!("starting {}: {}", tool, invocation.program);

        let status = self
            .runner
            .run(invocation)
            .await
            .map_err(|source| InkshedError::Launch {
                tool,
                program: invocation.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(InkshedError::ToolFailed {
                tool,
                program: invocation.program.clone(),
                code: status.code,
            })
        }
    }
}
