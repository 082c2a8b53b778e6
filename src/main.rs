use anyhow::{anyhow, Context, Result};
use cli::Cli;
use std::process::ExitCode;

mod cli;
mod config;
mod export;
mod summaries;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level).with_context(|| "Failed to initialise logging")?;

    let config = config::Configuration::load()?;

    match cli.command {
        cli::Commands::ExportPdf(args) => {
            let job = export::ExportJob::assemble(args, &config.export);
            let renderer = export::WeasyPrint::default();
            if export::convert_to_pdf(&job, &renderer) {
                Ok(())
            } else {
                Err(anyhow!("PDF conversion failed"))
            }
        }
        cli::Commands::Summaries(args) => summaries::run(&args, &config.summaries),
    }
}
