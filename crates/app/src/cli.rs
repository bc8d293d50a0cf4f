use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use tubedigest_infra::docx::DOCX_FILE_NAME;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(long, default_value = "fetch")]
    pub mode: Mode,
    /// Video URL to export (fetch mode).
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long, default_value = DOCX_FILE_NAME)]
    pub output: PathBuf,
}

impl Cli {
    /// Rejects argument combinations clap cannot express, before any config is read.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if matches!(self.mode, Mode::Fetch) && self.url.is_none() {
            return Err(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "fetch mode requires --url <URL>",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    Fetch,
    Serve,
}
