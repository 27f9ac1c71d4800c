use std::path::PathBuf;

use anyhow::ensure;
use clap::Args;
use console::style;
use nestsplit::prelude::*;

use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct CompressArgs {
    #[arg(help = "Path of the file to compress.")]
    input: PathBuf,

    #[arg(
        short,
        long,
        help = "Path for the compressed output file. Defaults to <INPUT>.bz2. \
                An existing target aborts."
    )]
    output: Option<PathBuf>,

    #[arg(
        short,
        long,
        default_value_t = DEFAULT_LEVEL,
        help = "Compression level (1-9)."
    )]
    level: u32,
}

impl CompressArgs {
    pub fn run(
        &self,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        ensure!(
            self.input.is_file(),
            "Input {} is not a file",
            self.input.display()
        );
        ensure!(
            (1..=9).contains(&self.level),
            "Compression level {} is out of range 1-9",
            self.level
        );

        let output = self.output.clone().unwrap_or_else(|| {
            let mut path = self.input.clone().into_os_string();
            path.push(".bz2");
            PathBuf::from(path)
        });

        let bytes = compress_file(&self.input, &output, self.level)?;
        println!(
            "[{}] {} bytes compressed to {}",
            style("V").green(),
            style(bytes).green(),
            output.display()
        );
        Ok(())
    }
}
