//! The external project-template engine.
//!
//! Draft pages are expanded from a cookiecutter template; the engine itself
//! is the `cookiecutter` program, invoked once per rendering context. The
//! trait exists so the batch loop can be exercised in tests without a
//! cookiecutter installation.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Variables supplied to the template engine for a single generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub repo_slug: String,
    pub github_username: String,
    pub owner: Option<String>,
}

impl RenderContext {
    /// Flatten into `key=value` pairs for the engine command line.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("repo_slug={}", self.repo_slug),
            format!("github_username={}", self.github_username),
        ];
        if let Some(owner) = &self.owner {
            args.push(format!("owner={owner}"));
        }
        args
    }
}

/// Expands a project template once per rendering context.
pub trait TemplateEngine {
    fn generate(&self, template: &Path, context: &RenderContext, output_dir: &Path)
        -> Result<()>;
}

/// The `cookiecutter` executable.
#[derive(Debug)]
pub struct Cookiecutter {
    program: PathBuf,
}

impl Default for Cookiecutter {
    fn default() -> Self {
        Cookiecutter {
            program: PathBuf::from("cookiecutter"),
        }
    }
}

impl TemplateEngine for Cookiecutter {
    fn generate(
        &self,
        template: &Path,
        context: &RenderContext,
        output_dir: &Path,
    ) -> Result<()> {
        let mut command = Command::new(&self.program);
        command
            .arg("--no-input")
            .arg("--output-dir")
            .arg(output_dir)
            .arg(template)
            .args(context.to_args());

        log::debug!("Running template engine: {command:?}");
        let output = command.output().with_context(|| {
            format!(
                "Failed to launch {} - is cookiecutter installed?",
                self.program.display()
            )
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "Template engine exited with {} for {}: {}",
                output.status,
                context.repo_slug,
                stderr.trim()
            ));
        }

        Ok(())
    }
}
