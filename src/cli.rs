use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Renders an HTML page and its stylesheets to a PDF file
    ExportPdf(ExportPdfArgs),
    /// Generates GitHub summary draft pages from a list of repositories
    Summaries(SummariesArgs),
}

#[derive(Args, Debug)]
pub struct ExportPdfArgs {
    /// Path of the source file to convert
    pub source_file: PathBuf,
    /// Path of the output PDF file
    pub destination_file: PathBuf,
    /// Directory containing CSS files to apply to the document
    pub css_directory: PathBuf,
    /// Directory containing images referenced by the document
    pub images_directory: Option<PathBuf>,
    /// Site URL prefix to rewrite to a local file:// URL (e.g. "/me/")
    #[clap(long)]
    pub url_prefix: Option<String>,
    /// Directory rewritten URLs resolve against; defaults to the source
    /// file's parent directory
    #[clap(long)]
    pub base_url: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SummariesArgs {
    /// JSON file of repositories of the shape [{"owner": ..., "repo": ...}]
    #[clap(long)]
    pub repos: Option<PathBuf>,
    /// Directory the rendered drafts are written into
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Enable verbose logging
    #[clap(short, long, global = true)]
    pub verbose: bool,
    #[clap(subcommand)]
    pub command: Commands,
}
