use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use dogtrainer::{
    provenance, DatadogClient, Definitions, Error, LogConfig, MonitorId, Settings, Trainer,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "dogtrainer")]
#[command(about = "Keep Datadog monitors and boards in line with definitions in source control")]
struct Args {
    /// Settings file (TOML, YAML or JSON); DOGTRAINER_* variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging with timestamps
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Where the definitions live, shown in alert messages and board
    /// descriptions. Discovered from the environment or git when omitted.
    #[arg(long, global = true)]
    repo_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or update every monitor and board in a definitions file
    Apply {
        /// JSON definitions file
        file: PathBuf,
    },

    /// Mute monitors
    Mute {
        #[command(flatten)]
        target: Target,

        /// POSIX timestamp at which the mute ends; mutes indefinitely when omitted
        #[arg(long)]
        until: Option<i64>,
    },

    /// Remove all mutes from monitors
    Unmute {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct Target {
    /// Monitor id
    #[arg(long)]
    id: Option<MonitorId>,

    /// Exact monitor name
    #[arg(long)]
    name: Option<String>,

    /// Every monitor whose name contains this text
    #[arg(long)]
    matching: Option<String>,
}

enum Selection {
    Id(MonitorId),
    Name(String),
    Matching(String),
}

impl Target {
    fn selection(self) -> Option<Selection> {
        self.id
            .map(Selection::Id)
            .or(self.name.map(Selection::Name))
            .or(self.matching.map(Selection::Matching))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    LogConfig::new(args.verbose).init();

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(run(args));

    if let Err(e) = &result {
        if let Some(err) = e.downcast_ref::<Error>() {
            if err.is_fatal() {
                error!("{}", err);
            }
        }
    }
    result
}

async fn run(args: Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    let explicit = args.repo_path.as_deref().or(settings.repo_path.as_deref());
    let cwd = std::env::current_dir()?;
    let provenance = provenance::resolve(explicit, &cwd)?;

    let client = settings
        .client_builder()
        .build()
        .context("Failed to create Datadog client")?;
    let trainer = Trainer::new(client, settings.notify_to.clone(), provenance);

    match args.command {
        Command::Apply { file } => apply(&trainer, file).await,
        Command::Mute { target, until } => mute(&trainer, target, until).await,
        Command::Unmute { target } => unmute(&trainer, target).await,
    }
}

async fn apply(trainer: &Trainer<DatadogClient>, file: PathBuf) -> Result<()> {
    let definitions = Definitions::load(&file)?;
    let summary = definitions.apply(trainer).await?;
    if summary.failed_monitors > 0 {
        bail!(
            "{} of {} monitors could not be created or updated",
            summary.failed_monitors,
            summary.monitors
        );
    }
    Ok(())
}

async fn mute(trainer: &Trainer<DatadogClient>, target: Target, until: Option<i64>) -> Result<()> {
    let response = match target.selection().context("No monitor selected")? {
        Selection::Id(id) => trainer.mute_monitor_by_id(id, until).await?,
        Selection::Name(name) => trainer.mute_monitor_by_name(&name, until).await?,
        Selection::Matching(pattern) => {
            let muted = trainer.mute_monitors_by_regex(pattern, until).await?;
            info!("Muted {} monitors", muted.len());
            return Ok(());
        }
    };
    response.into_result()?;
    Ok(())
}

async fn unmute(trainer: &Trainer<DatadogClient>, target: Target) -> Result<()> {
    let response = match target.selection().context("No monitor selected")? {
        Selection::Id(id) => trainer.unmute_monitor_by_id(id).await?,
        Selection::Name(name) => trainer.unmute_monitor_by_name(&name).await?,
        Selection::Matching(pattern) => {
            let unmuted = trainer.unmute_monitors_by_regex(pattern).await?;
            info!("Unmuted {} monitors", unmuted.len());
            return Ok(());
        }
    };
    response.into_result()?;
    Ok(())
}
