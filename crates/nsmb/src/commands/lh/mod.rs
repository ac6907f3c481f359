use std::{fs::File, path::Path};

use miette::{Context, IntoDiagnostic, Result};

pub mod decompress;
pub mod info;
pub mod unpack;

#[derive(clap::Subcommand)]
pub enum LhCommands {
    /// Show the header of a file
    Info(info::InfoArgs),
    /// Decompress a single LH file
    Decompress(decompress::DecompressArgs),
    /// Decompress every LH file found in a directory
    Unpack(unpack::UnpackArgs),
}

impl LhCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            LhCommands::Info(info) => info.handle(),
            LhCommands::Decompress(decompress) => decompress.handle(),
            LhCommands::Unpack(unpack) => unpack.handle(),
        }
    }
}

/// Create `path` for writing, refusing to replace an existing file unless `overwrite` is set.
pub(crate) fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .context(format!("creating {}", parent.display()))?;
    }

    if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    }
}
