use clap::Parser;
use tracing_subscriber::prelude::*;

use queries::QueryJob;
use report::FailurePolicy;

mod client;
mod datamodel;
mod queries;
mod report;


/// Prints token ownership reports from the Aptos indexer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Keep running the remaining queries after one fails
    #[arg(
        long,
        env = "TOKEN_REPORT_CONTINUE_ON_ERROR",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    continue_on_error: bool,
    /// Only run the named query. May be repeated
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    let jobs = opts.jobs()?;
    let http = reqwest::Client::new();

    let mut stdout = std::io::stdout().lock();
    report::run(&http, &jobs, FailurePolicy::from(&opts), &mut stdout).await
}

impl Opts {
    /// The catalogue, narrowed down by `--only`.
    fn jobs(&self) -> anyhow::Result<Vec<QueryJob>> {
        queries::select(queries::catalogue()?, &self.only)
    }
}

impl From<&Opts> for FailurePolicy {
    fn from(opts: &Opts) -> Self {
        if opts.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        }
    }
}
