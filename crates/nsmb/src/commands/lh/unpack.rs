use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::create_output;

#[derive(Args)]
pub struct UnpackArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// Allow overwriting files in the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl UnpackArgs {
    pub fn handle(&self) -> Result<()> {
        let files = WalkDir::new(&self.directory)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .collect::<Vec<_>>();

        if files.is_empty() {
            return Err(miette!("directory is empty"));
        }

        let mut unpacked = 0;
        let mut failed = 0;
        for file in files {
            let name = file
                .path()
                .strip_prefix(&self.directory)
                .into_diagnostic()?;

            let data = std::fs::read(file.path())
                .into_diagnostic()
                .context(format!("opening {}", file.path().display()))?;
            if !nsmb_lh::is_compressed(&data) {
                debug!("skipping {}", name.display());
                continue;
            }

            let decompressed = match nsmb_lh::decompress(&data) {
                Ok(decompressed) => decompressed,
                Err(err) => {
                    warn!("unable to decompress {}: {}", name.display(), err);
                    failed += 1;
                    continue;
                }
            };

            let target = self.output.join(name);
            info!("writing {}", target.display());
            create_output(&target, self.overwrite)?
                .write_all(&decompressed)
                .into_diagnostic()
                .context(format!("writing {}", target.display()))?;
            unpacked += 1;
        }

        info!("unpacked {} files, {} could not be decoded", unpacked, failed);
        if failed > 0 {
            return Err(miette!(
                "{} of {} compressed files could not be decoded",
                failed,
                unpacked + failed
            ));
        }
        Ok(())
    }
}
