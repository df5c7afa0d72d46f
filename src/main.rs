#![forbid(unsafe_code)]

mod cmd;
mod merge;
mod output;
mod settings;
mod sum;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "jiraq: Jira issue retrieval and aggregation tool",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "List available Jira fields, including custom field ids")]
    Fields,

    #[command(about = "Get a single ticket by issue key")]
    Get(cmd::get::GetArgs),

    #[command(about = "List tickets matching a JQL query")]
    List(cmd::list::ListArgs),

    #[command(about = "Merge exported JSON issue files, keeping the latest update per key")]
    Merge(cmd::merge::MergeArgs),

    #[command(about = "Sum custom field values for issues matching a JQL query")]
    Sum(cmd::sum::SumArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("JIRAQ_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "jiraq=debug,jiraq_api=debug,info"
        } else {
            "jiraq=info,jiraq_api=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fields => cmd::fields::run().await,
        Commands::Get(args) => cmd::get::run(args).await,
        Commands::List(args) => cmd::list::run(args).await,
        Commands::Merge(args) => cmd::merge::run(args),
        Commands::Sum(args) => cmd::sum::run(args).await,
    }
}
