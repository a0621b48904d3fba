use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod seed;

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the API server
    Api(billsight_server::Run),
    /// Load a dataset file into the database
    Seed(seed::Seed),
}

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "billsightd",
    long_about = None
)]
pub struct Billsightd {
    #[command(subcommand)]
    command: Command,
}

impl Billsightd {
    async fn run(self) -> ExitCode {
        match self.run_command().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        log::error!("Caused by:");
                    }
                    log::error!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }

    async fn run_command(self) -> anyhow::Result<()> {
        match self.command {
            Command::Api(run) => run.run().await,
            Command::Seed(seed) => seed.run().await,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Billsightd::parse().run().await
}
