use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use credrisk_core::ServingContext;

mod api;
mod config;
mod error;
mod score;

use config::ServiceConfig;
use error::ServerError;
use score::OutputMode;

#[derive(Debug, Parser)]
#[command(
    name = "credrisk",
    version,
    about = "Loan default risk prediction service",
    long_about = "credrisk serves a pre-trained loan default classifier.\n\n\
        EXAMPLES:\n\
        \n  credrisk serve                              Serve on the configured address\n\
        \n  credrisk --config credrisk.toml serve --bind 0.0.0.0:8000\n\
        \n  credrisk score application.json             Score one record offline\n\
        \n  cat application.json | credrisk score --json"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP prediction service (default)
    Serve(ServeArgs),

    /// Score a single JSON record from a file or stdin
    Score(ScoreArgs),
}

#[derive(Debug, Args, Default)]
struct ArtifactArgs {
    /// Directory holding the encoder and scorer artifacts
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Scorer artifact file name, relative to the artifact directory
    #[arg(long)]
    scorer: Option<PathBuf>,

    /// Decision threshold in [0, 1]
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Debug, Args, Default)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,

    #[command(flatten)]
    artifacts: ArtifactArgs,
}

#[derive(Debug, Args)]
struct ScoreArgs {
    /// JSON record to score; reads stdin when omitted
    file: Option<PathBuf>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    artifacts: ArtifactArgs,
}

impl ArtifactArgs {
    fn apply(&self, config: &mut ServiceConfig) {
        if let Some(dir) = &self.artifacts {
            config.artifacts.dir = dir.clone();
        }
        if let Some(scorer) = &self.scorer {
            config.artifacts.scorer = scorer.clone();
        }
        if let Some(t) = self.threshold {
            config.decision.threshold = t;
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_context(config: &ServiceConfig) -> Result<ServingContext, ServerError> {
    let policy = config.policy()?;
    Ok(ServingContext::load(
        &config.artifacts.dir,
        &config.artifacts.scorer,
        policy,
    )?)
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let mut config = match &cli.config {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            args.artifacts.apply(&mut config);
            if let Some(bind) = args.bind {
                config.server.bind = bind;
            }
            let ctx = Arc::new(load_context(&config)?);
            api::serve(ctx, config.server.bind).await
        }
        Command::Score(args) => {
            args.artifacts.apply(&mut config);
            let ctx = load_context(&config)?;
            let record = score::read_record(args.file.as_ref())?;
            let mode = if args.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            };
            println!("{}", score::score(&ctx, record, mode)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
