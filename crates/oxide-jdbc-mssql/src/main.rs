//! oxide-jdbc-mssql CLI
//!
//! Inspects how a SQL Server catalog configuration is applied: the
//! connection properties handed to the driver, the SQL type names used
//! for engine types, and identifier quoting. It never opens connections.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_jdbc_core::client::PASSWORD_PROPERTY;
use oxide_jdbc_core::{
    Connection, ConnectionProperties, ConnectorId, Driver, DriverError, EngineType,
    IsolationLevel, JdbcClient,
};
use oxide_jdbc_mssql::{MsSqlCatalogConfig, MsSqlClient};

/// Inspect a SQL Server connector configuration.
#[derive(Parser)]
#[command(name = "oxide-jdbc-mssql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog configuration file (JSON).
    #[arg(short, long, env = "OXIDE_JDBC_CONFIG")]
    config: PathBuf,

    /// Catalog name.
    #[arg(long, default_value = "sqlserver")]
    connector: String,

    /// Override the configured isolation level (number or name).
    #[arg(short, long)]
    isolation_level: Option<IsolationLevel>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the connection properties passed to the driver.
    Properties,

    /// Print the SQL Server type name for an engine type.
    TypeName {
        /// Engine type, e.g. `timestamp with time zone` or `varchar(20)`.
        engine_type: String,
    },

    /// Print a quoted identifier.
    Quote {
        /// Identifier to quote.
        identifier: String,
    },
}

/// Stand-in driver: the CLI only inspects configuration.
#[derive(Debug)]
struct OfflineDriver;

impl Driver for OfflineDriver {
    fn name(&self) -> &str {
        "offline"
    }

    fn connect(
        &self,
        url: &str,
        _properties: &ConnectionProperties,
    ) -> Result<Box<dyn Connection>, DriverError> {
        Err(DriverError::new(format!(
            "refusing to connect to {url}: no driver is loaded"
        )))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = MsSqlCatalogConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(level) = cli.isolation_level {
        debug!(%level, "overriding configured isolation level");
        config.isolation_level = level;
    }

    let client = MsSqlClient::new(
        ConnectorId::new(cli.connector),
        &config.base,
        &config.mssql(),
        || Ok(OfflineDriver),
    )?;

    match cli.command {
        Commands::Properties => {
            for (key, value) in client.connection_properties().iter() {
                let shown = if key == PASSWORD_PROPERTY { "****" } else { value };
                println!("{key}={shown}");
            }
        }

        Commands::TypeName { engine_type } => {
            let ty: EngineType = engine_type.parse()?;
            println!("{}", client.to_sql_type(&ty)?);
        }

        Commands::Quote { identifier } => {
            println!("{}", client.quote_identifier(&identifier));
        }
    }

    Ok(())
}
