//! The external HTML/CSS-to-PDF renderer.
//!
//! Rendering is delegated wholesale to WeasyPrint, invoked as a subprocess.
//! The trait exists so the conversion pipeline can be exercised in tests
//! without a WeasyPrint installation.

use anyhow::{anyhow, Context, Result};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A document ready for rendering.
#[derive(Debug)]
pub enum Document {
    /// In-memory markup (possibly rewritten), plus the base URL relative
    /// references resolve against.
    Markup { html: String, base_url: PathBuf },
    /// A file handed to the renderer untouched.
    File { path: PathBuf, base_url: PathBuf },
}

/// Renders a document plus stylesheets into a PDF file.
pub trait Renderer {
    fn render(
        &self,
        document: &Document,
        stylesheets: &[PathBuf],
        destination: &Path,
    ) -> Result<()>;
}

/// The `weasyprint` executable.
#[derive(Debug)]
pub struct WeasyPrint {
    program: PathBuf,
}

impl Default for WeasyPrint {
    fn default() -> Self {
        WeasyPrint {
            program: PathBuf::from("weasyprint"),
        }
    }
}

impl Renderer for WeasyPrint {
    fn render(
        &self,
        document: &Document,
        stylesheets: &[PathBuf],
        destination: &Path,
    ) -> Result<()> {
        let mut command = Command::new(&self.program);

        match document {
            Document::Markup { base_url, .. } => {
                // "-" makes WeasyPrint read the markup from stdin
                command.arg("-").arg(destination);
                command.arg("--base-url").arg(base_url);
                command.stdin(Stdio::piped());
            }
            Document::File { path, base_url } => {
                command.arg(path).arg(destination);
                command.arg("--base-url").arg(base_url);
                command.stdin(Stdio::null());
            }
        }
        for sheet in stylesheets {
            command.arg("--stylesheet").arg(sheet);
        }
        command.stdout(Stdio::null()).stderr(Stdio::piped());

        log::debug!("Running renderer: {command:?}");
        let mut child = command.spawn().with_context(|| {
            format!(
                "Failed to launch {} - is WeasyPrint installed?",
                self.program.display()
            )
        })?;

        if let Document::Markup { html, .. } = document {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| anyhow!("Failed to open renderer stdin"))?;
            stdin
                .write_all(html.as_bytes())
                .with_context(|| "Failed to write markup to renderer")?;
            // dropping the handle closes the pipe so the renderer sees EOF
        }

        let output = child
            .wait_with_output()
            .with_context(|| "Failed to wait for renderer")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "Renderer exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        Ok(())
    }
}
