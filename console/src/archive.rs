use std::path::PathBuf;

use anyhow::ensure;
use clap::Args;
use console::style;
use nestsplit::prelude::*;

use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct ArchiveArgs {
    #[arg(
        help = "Path to a zipped dataset folder. The archive <stem>.zip must \
                contain <stem>/0.filelist."
    )]
    zip: PathBuf,
}

impl ArchiveArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        ensure!(
            self.zip.is_file(),
            "Archive {} does not exist",
            self.zip.display()
        );

        let names = zipped_manifest(&self.zip)?;
        for name in &names {
            println!("{name}");
        }
        println!(
            "[{}] {} entries listed in {}",
            style("V").green(),
            style(names.len()).green(),
            self.zip.display()
        );
        Ok(())
    }
}
