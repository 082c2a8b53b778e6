//! PDF export: renders an HTML page plus a directory of stylesheets to a
//! PDF file by delegating to an external renderer.
//!
//! This module owns everything up to the renderer boundary: path validation,
//! destination directory creation, stylesheet discovery, and the URL-prefix
//! rewrite that makes site-relative asset links resolve on the local
//! filesystem. Layout and PDF generation are entirely the renderer's job.

mod renderer;
mod rewrite;
mod stylesheets;

pub use renderer::{Document, Renderer, WeasyPrint};

use crate::cli::ExportPdfArgs;
use crate::config::ExportConfig;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Everything needed for one conversion run.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub source_file: PathBuf,
    pub destination_file: PathBuf,
    pub css_directory: PathBuf,
    pub images_directory: Option<PathBuf>,
    pub url_prefix: Option<String>,
    pub base_url: Option<PathBuf>,
}

impl ExportJob {
    /// Combine command-line arguments with the configuration file; arguments
    /// win.
    pub fn assemble(args: ExportPdfArgs, config: &ExportConfig) -> ExportJob {
        ExportJob {
            source_file: args.source_file,
            destination_file: args.destination_file,
            css_directory: args.css_directory,
            images_directory: args.images_directory,
            url_prefix: args.url_prefix.or_else(|| config.url_prefix.clone()),
            base_url: args.base_url.or_else(|| config.base_url.clone()),
        }
    }
}

/// Convert the job's source file to a PDF.
///
/// All failures are logged and collapsed into `false`; the caller decides
/// the exit code. The destination's parent directories may exist afterwards
/// even when conversion failed.
pub fn convert_to_pdf(job: &ExportJob, renderer: &dyn Renderer) -> bool {
    match try_convert(job, renderer) {
        Ok(()) => {
            log::info!(
                "Successfully created PDF: {}",
                job.destination_file.display()
            );
            true
        }
        Err(e) => {
            log::error!(
                "Error converting {} to PDF: {e:#}",
                job.source_file.display()
            );
            false
        }
    }
}

fn try_convert(job: &ExportJob, renderer: &dyn Renderer) -> Result<()> {
    // validate before creating anything, so a bad source leaves no trace
    if !job.source_file.is_file() {
        return Err(anyhow!(
            "Source file does not exist: {}",
            job.source_file.display()
        ));
    }

    let images_directory = match &job.images_directory {
        Some(dir) if !dir.is_dir() => {
            log::warn!("Images directory does not exist: {}", dir.display());
            None
        }
        other => other.clone(),
    };
    match &images_directory {
        Some(dir) => log::info!("Using images directory: {}", dir.display()),
        None => log::info!(
            "Using source file directory for images: {}",
            job.source_file.parent().unwrap_or(Path::new(".")).display()
        ),
    }

    if let Some(parent) = job.destination_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!(
                    "Failed to create destination directory {}",
                    parent.display()
                )
            })?;
        }
    }

    let stylesheets = stylesheets::find_stylesheets(&job.css_directory)?;
    log::info!(
        "Found {} CSS files in {}",
        stylesheets.len(),
        job.css_directory.display()
    );
    for sheet in &stylesheets {
        log::debug!("Loaded CSS: {}", sheet.display());
    }

    let document = load_document(job)?;

    log::info!("Converting {} to PDF...", job.source_file.display());
    renderer
        .render(&document, &stylesheets, &job.destination_file)
        .with_context(|| "Failed to render PDF")?;

    Ok(())
}

/// Read and prepare the source document.
///
/// HTML sources are read into memory so the URL-prefix rewrite can run over
/// them; anything else is handed to the renderer as a plain file.
fn load_document(job: &ExportJob) -> Result<Document> {
    let base_url = match &job.base_url {
        Some(dir) => dir.clone(),
        None => job
            .source_file
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf(),
    };
    // the renderer needs an absolute base to build file:// URLs from
    let base_url = base_url
        .canonicalize()
        .with_context(|| format!("Failed to resolve base URL {}", base_url.display()))?;
    log::debug!("Using base URL: {}", base_url.display());

    let is_html = job
        .source_file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false);

    if is_html {
        let mut html = std::fs::read_to_string(&job.source_file).with_context(|| {
            format!("Failed to read source file {}", job.source_file.display())
        })?;
        if let Some(prefix) = &job.url_prefix {
            html = rewrite::rewrite_url_prefix(&html, prefix, &base_url);
        }
        Ok(Document::Markup { html, base_url })
    } else {
        Ok(Document::File {
            path: job.source_file.clone(),
            base_url,
        })
    }
}
