use crate::demo::{run_batch, run_demo, run_estimate, BatchArgs, EstimateArgs};
use crate::infra::command_config;
use crate::server;
use bid_engine::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Bid Price Estimator",
    about = "Estimate public tender bid prices from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate a single tender from command line fields
    Estimate(EstimateArgs),
    /// Estimate every tender in a registry CSV export
    Batch(BatchArgs),
    /// Price a sample tender with every rate strategy
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(&command_config()?, args),
        Command::Batch(args) => run_batch(&command_config()?, args),
        Command::Demo => run_demo(&command_config()?),
    }
}
