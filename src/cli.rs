use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::dashboard::refresh::{refresh_once, spawn_refresh, DEFAULT_REFRESH_SECS};
use crate::dashboard::server;
use crate::import::{import_csv, ImportOptions, DEFAULT_AGGREGATE_SUITE, DEFAULT_DELIMITER};
use crate::store::{MongoStore, RunStore, StoreUri};

const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/";

#[derive(Parser)]
#[command(name = "scenario-report")]
#[command(author, version, about = "Daily scenario test report", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// MongoDB connection string
    #[arg(long, global = true, env = "MONGO_URI", default_value = DEFAULT_MONGO_URI, hide_env_values = true)]
    mongo_uri: String,

    /// Database holding the results collection
    #[arg(long, global = true, env = "MONGO_DATABASE", default_value = "testDatabase")]
    database: String,

    /// Collection with one document per test day
    #[arg(long, global = true, env = "MONGO_COLLECTION", default_value = "testResults")]
    collection: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a daily scenario test CSV export
    Import {
        /// CSV file to import
        csv: PathBuf,

        /// Separator between suite name and metric in column headers
        #[arg(long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,

        /// Suite whose columns hold the overall totals
        #[arg(long, default_value = DEFAULT_AGGREGATE_SUITE)]
        aggregate_suite: String,
    },

    /// Serve the live dashboard
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to bind
        #[arg(short, long, env = "PORT", default_value_t = 8050)]
        port: u16,

        /// Seconds between dashboard refreshes
        #[arg(long, default_value_t = DEFAULT_REFRESH_SECS, value_parser = clap::value_parser!(u64).range(1..))]
        refresh_secs: u64,
    },

    /// Print the current dashboard data as JSON
    Snapshot {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty print JSON output
        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let uri = StoreUri::from(self.mongo_uri.as_str());
        let store = MongoStore::connect(&uri, &self.database, &self.collection).await?;

        match &self.command {
            Commands::Import {
                csv,
                delimiter,
                aggregate_suite,
            } => {
                let options = ImportOptions {
                    delimiter: *delimiter,
                    aggregate_suite: aggregate_suite.clone(),
                };

                let summary = import_csv(csv, &store, &options).await?;
                info!("Suites found: {}", summary.suites.join(", "));
                println!(
                    "Imported {} of {} rows from {} into {}.{}",
                    summary.documents_inserted,
                    summary.rows_read,
                    csv.display(),
                    self.database,
                    self.collection
                );

                Ok(())
            }
            Commands::Serve {
                host,
                port,
                refresh_secs,
            } => {
                let store: Arc<dyn RunStore> = Arc::new(store);
                let initial = refresh_once(store.as_ref()).await?;
                info!(
                    "Loaded {} documents, refreshing every {refresh_secs}s",
                    initial.documents
                );

                let (snapshots, _refresh) =
                    spawn_refresh(store, Duration::from_secs(*refresh_secs), initial);

                let listener = TcpListener::bind((host.as_str(), *port)).await?;
                server::serve(listener, snapshots).await?;

                Ok(())
            }
            Commands::Snapshot { output, pretty } => {
                let snapshot = refresh_once(&store).await?;

                let json_output = if *pretty {
                    serde_json::to_string_pretty(&snapshot)?
                } else {
                    serde_json::to_string(&snapshot)?
                };

                if let Some(output_path) = output {
                    std::fs::write(output_path, json_output)?;
                    info!("Snapshot written to: {}", output_path.display());
                } else {
                    println!("{json_output}");
                }

                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_import_defaults() {
        let cli = Cli::try_parse_from(["scenario-report", "import", "daily.csv"]).unwrap();

        assert_eq!(cli.database, "testDatabase");
        assert_eq!(cli.collection, "testResults");
        match cli.command {
            Commands::Import {
                csv,
                delimiter,
                aggregate_suite,
            } => {
                assert_eq!(csv, PathBuf::from("daily.csv"));
                assert_eq!(delimiter, '：');
                assert_eq!(aggregate_suite, "シナリオテスト総計");
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn test_serve_rejects_zero_refresh() {
        let result = Cli::try_parse_from(["scenario-report", "serve", "--refresh-secs", "0"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "scenario-report",
            "snapshot",
            "--database",
            "nightly",
            "--pretty",
        ])
        .unwrap();

        assert_eq!(cli.database, "nightly");
        assert!(matches!(cli.command, Commands::Snapshot { pretty: true, .. }));
    }
}
