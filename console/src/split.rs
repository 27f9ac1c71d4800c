use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{
    ensure,
    Context,
};
use clap::Args;
use console::style;
use indicatif::ProgressBar;
use log::info;
use nestsplit::prelude::*;

use crate::strings;
use crate::utils::{
    init_spinner,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct SplitArgs {
    #[arg(help = strings::split::INPUT)]
    input: PathBuf,

    #[arg(short, long, required = true, help = strings::split::OUTPUT)]
    output: PathBuf,

    #[arg(
        short = 'n',
        long = "max-items",
        default_value_t = DEFAULT_MAX_ITEMS,
        help = strings::split::MAX_ITEMS
    )]
    max_items: usize,

    #[arg(short = 'p', long = "prefix", help = strings::split::PREFIXES)]
    prefixes: Vec<String>,

    #[arg(
        short,
        long,
        default_value = DEFAULT_SEPARATOR,
        help = strings::split::SEPARATOR
    )]
    separator: String,
}

/// Forwards run events to the file log while driving the progress display.
struct ProgressLog<'a> {
    inner: FileRunLog,
    bar:   &'a ProgressBar,
}

impl RunLog for ProgressLog<'_> {
    fn record(
        &mut self,
        event: SplitEvent,
    ) -> anyhow::Result<()> {
        if let SplitEvent::SegmentWritten { label, .. } = &event {
            self.bar.inc(1);
            self.bar.set_message(format!("Saved {label}"));
        }
        self.inner.record(event)
    }
}

impl SplitArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        ensure!(
            self.input.is_file(),
            "Input {} is not a file",
            self.input.display()
        );

        let config = SplitConfig::default()
            .with_max_items(self.max_items)
            .with_field_prefixes(self.prefixes.clone())
            .with_separator(self.separator.clone());
        config.validate()?;

        let log_path = run_log_path(&self.output);
        let file_log = FileRunLog::create(&log_path)?;
        info!("Run log at {}", log_path.display());

        let mut sink = FsSegmentSink::new(self.output.clone())?;
        let source = BufReader::new(File::open(&self.input).with_context(
            || format!("failed to open {}", self.input.display()),
        )?);

        let bar = if utils.progress {
            init_spinner()?
        }
        else {
            ProgressBar::hidden()
        };
        let mut log = ProgressLog {
            inner: file_log,
            bar:   &bar,
        };

        let summary =
            split_to_sink(source, Some(&self.input), config, &mut sink, &mut log)?;
        bar.finish_and_clear();

        println!(
            "[{}] {} lines (except empty lines) saved into {} segments",
            style("V").green(),
            style(summary.lines_total).green(),
            style(summary.segments_total).green()
        );
        Ok(())
    }
}
