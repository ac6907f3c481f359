use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use super::create_output;

#[derive(Args)]
pub struct DecompressArgs {
    /// An input LH file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecompressArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let decompressed = nsmb_lh::decompress(&data)
            .context(format!("decompressing {}", &self.file.display()))?;

        info!("writing {}", self.output.display());
        create_output(&self.output, self.overwrite)?
            .write_all(&decompressed)
            .into_diagnostic()
            .context(format!("writing {}", &self.output.display()))?;

        Ok(())
    }
}
