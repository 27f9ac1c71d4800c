use std::fs;
use std::path::PathBuf;

use anyhow::{
    ensure,
    Context,
};
use clap::Args;
use console::style;
use dialoguer::Confirm;
use log::info;
use nestsplit::prelude::*;

use crate::strings;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct CopyArgs {
    #[arg(help = strings::copy::QUERIES)]
    queries: PathBuf,

    #[arg(help = strings::copy::TOP)]
    top: PathBuf,

    #[arg(short, long, required = true, help = strings::copy::OUTPUT)]
    output: PathBuf,

    #[arg(long, help = strings::copy::PREFIX)]
    prefix: Option<String>,

    #[arg(long, help = strings::copy::SUFFIX)]
    suffix: Option<String>,

    #[arg(short, long, help = strings::copy::FORCE)]
    force: bool,
}

impl CopyArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        ensure!(
            self.top.is_dir(),
            "Top directory {} does not exist",
            self.top.display()
        );

        let queries = read_manifest(&self.queries)?;
        info!("Read {} queries from {}", queries.len(), self.queries.display());

        if !self.force {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Copy files matching {} queries from {} into {}?",
                    queries.len(),
                    self.top.display(),
                    self.output.display()
                ))
                .interact()?;
            if !confirmed {
                println!("{}", style("Aborted").red());
                return Ok(());
            }
        }

        fs::create_dir_all(&self.output).with_context(|| {
            format!("failed to create {}", self.output.display())
        })?;

        let parts = PatternParts::new(self.prefix.clone(), self.suffix.clone());
        let copied = copy_matching(&queries, &self.top, &self.output, &parts)?;
        let listed = write_manifest(&self.output)?;

        println!(
            "[{}] {} files copied to {} ({} listed in manifest)",
            style("V").green(),
            style(copied).green(),
            self.output.display(),
            listed.len()
        );
        Ok(())
    }
}
