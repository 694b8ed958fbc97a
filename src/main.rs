use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info};

use bank_accounts::{
    adapter::{InMemoryAccountStorage, SqliteAccountStorage},
    api,
    service::AccountService,
    Result,
};

/// Command line arguments
#[derive(Debug, Parser)]
struct CLIArguments {
    /// The address the HTTP server listens on.
    #[arg(long, env = "BANK_ACCOUNTS_LISTEN", default_value = "127.0.0.1:8080")]
    listen: SocketAddr,

    /// The path of the SQLite database file. Accounts are kept in memory when
    /// not set.
    #[arg(long, env = "BANK_ACCOUNTS_DATABASE")]
    database: Option<PathBuf>,
}

struct Application {
    listen: SocketAddr,
    service: Arc<AccountService>,
}

impl Application {
    fn new(arguments: CLIArguments) -> Result<Self> {
        let service = match &arguments.database {
            Some(path) => {
                debug!("Using SQLite storage: '{}'.", path.display());
                AccountService::new(SqliteAccountStorage::open(path)?)
            }
            None => {
                debug!("Using in-memory storage.");
                AccountService::new(InMemoryAccountStorage::default())
            }
        };
        let this = Self {
            listen: arguments.listen,
            service: Arc::new(service),
        };

        Ok(this)
    }

    async fn run(self) -> Result<()> {
        info!("Starting BANK_ACCOUNTS version {}", env!("CARGO_PKG_VERSION"));

        let listener = tokio::net::TcpListener::bind(self.listen)
            .await
            .with_context(|| format!("Could not bind to {}.", self.listen))?;
        info!("Listening on {}", self.listen);

        axum::serve(listener, api::router(self.service))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("Could not listen to the shutdown signal: {}", error);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let arguments = CLIArguments::parse();
    env_logger::init();
    let result = match Application::new(arguments) {
        Ok(application) => application.run().await,
        Err(error) => Err(error),
    };

    match &result {
        Ok(_) => {
            info!("BANK_ACCOUNTS stopped");
        }
        Err(error) => {
            error!("BANK_ACCOUNTS failed with error: {}", error);
        }
    };

    result
}
