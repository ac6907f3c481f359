use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use nsmb_lh::LhHeader;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// An input file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Decode the whole file to check it is intact
    #[arg(long, default_value_t = false)]
    verify: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        println!("{}", self.file.display().bold());
        if !nsmb_lh::is_compressed(&data) {
            println!("  {} ({} bytes)", "not LH compressed".yellow(), data.len());
            return Ok(());
        }

        let header = LhHeader::parse(&data)?;
        println!("  {}", "LH compressed".green());
        println!("  header:       {} bytes", header.data_offset());
        println!("  compressed:   {} bytes", data.len());
        println!("  decompressed: {} bytes", header.size());
        if header.size() > 0 {
            println!(
                "  ratio:        {:.1}%",
                data.len() as f64 * 100.0 / f64::from(header.size())
            );
        }

        if self.verify {
            nsmb_lh::decompress(&data)
                .context(format!("decompressing {}", &self.file.display()))?;
            println!("  {}", "stream decodes cleanly".green());
        }

        Ok(())
    }
}
