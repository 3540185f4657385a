use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use cmd::command::extra_data;
use cmd::command::extra_data::ExtraData;
use cmd::command::fit;
use cmd::command::fit::Fit;
use cmd::config::Config;
use cmd::config::LogLevel;
use cmd::error::Result;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Subcommand, Clone)]
enum Commands {
    /// Import decoded activity, monitoring and settings files
    Fit(Fit),
    /// Import daily extra data files
    ExtraData(ExtraData),
}

#[derive(Parser)]
#[command(propagate_version = true)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides `log.level` of the config
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let cfg = Config::load(args.config.as_deref())?;
    let mut cfg: common::config::Config = cfg.try_into()?;
    if let Some(level) = args.log_level {
        cfg.log.level = level.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.log.level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("healthdb-import v{}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Commands::Fit(args) => {
            fit::run(args, &cfg)?;
        }
        Commands::ExtraData(args) => {
            extra_data::run(args, &cfg)?;
        }
    }

    Ok(())
}
