use std::path::PathBuf;

use anyhow::ensure;
use clap::Args;
use console::style;
use nestsplit::prelude::*;

use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct ManifestArgs {
    #[arg(help = "Dataset directory to list.")]
    dir: PathBuf,

    #[arg(
        long,
        help = "Validate the existing manifest instead of writing a new one."
    )]
    check: bool,
}

impl ManifestArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        ensure!(
            self.dir.is_dir(),
            "Directory {} does not exist",
            self.dir.display()
        );

        if self.check {
            let names = read_manifest(&self.dir.join(MANIFEST_NAME))?;
            println!(
                "[{}] Manifest lists {} entries",
                style("V").green(),
                style(names.len()).green()
            );
        }
        else {
            let names = write_manifest(&self.dir)?;
            println!(
                "[{}] {} entries saved to {}",
                style("V").green(),
                style(names.len()).green(),
                self.dir.join(MANIFEST_NAME).display()
            );
        }
        Ok(())
    }
}
