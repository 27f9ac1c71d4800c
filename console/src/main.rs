mod archive;
mod compress;
mod copy;
mod manifest;
mod split;
mod strings;
mod utils;

use archive::ArchiveArgs;
use clap::{
    Parser,
    Subcommand,
};
use compress::CompressArgs;
use copy::CopyArgs;
use manifest::ManifestArgs;
use split::SplitArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    Split {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  SplitArgs,
    },

    Copy {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  CopyArgs,
    },

    Manifest {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  ManifestArgs,
    },

    Compress {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  CompressArgs,
    },

    Archive {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  ArchiveArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Split { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Copy { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Manifest { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Compress { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Archive { utils, args } => {
            utils.setup()?;
            args.run(&utils)?
        },
    }
    Ok(())
}
