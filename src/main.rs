use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use receivables::application::workflow::CollectionWorkflow;
use receivables::config::WorkflowConfig;
use receivables::domain::ports::ReceivableStoreBox;
use receivables::infrastructure::in_memory::InMemoryReceivableStore;
#[cfg(feature = "storage-rocksdb")]
use receivables::infrastructure::rocksdb::RocksDBStore;
use receivables::interfaces::csv::collection_reader::CollectionReader;
use receivables::interfaces::csv::outcome_writer::OutcomeWriter;
use receivables::interfaces::csv::receivable_reader::ReceivableReader;
use receivables::interfaces::csv::receivable_writer::ReceivableWriter;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "RECEIVABLES_DB_PATH", global = true)]
    db_path: Option<PathBuf>,

    /// Extra attempts after a transaction conflict (overrides RECEIVABLES_MAX_RETRIES)
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load receivables from a CSV file into the store
    Import {
        /// Receivables CSV file
        file: PathBuf,
    },
    /// Apply a CSV of collections and print one outcome row per request
    Collect {
        /// Collections CSV file (receivable, amount)
        file: PathBuf,
        /// Receivables CSV to load first
        #[arg(long)]
        receivables: Option<PathBuf>,
    },
    /// List the pending receivables of one partner
    Pending {
        /// Partner id or partner code, matched verbatim
        #[arg(long)]
        partner: String,
        /// Receivables CSV to load first
        #[arg(long)]
        receivables: Option<PathBuf>,
        /// Print JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Print every receivable in the store
    Report {
        /// Receivables CSV to load first
        #[arg(long)]
        receivables: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("receivables=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = WorkflowConfig::from_env().into_diagnostic()?;
    if let Some(max_retries) = cli.max_retries {
        config = config.with_max_retries(max_retries);
    }
    let workflow = CollectionWorkflow::with_config(open_store(cli.db_path)?, config);

    match cli.command {
        Command::Import { file } => {
            import(&workflow, &file).await?;
        }
        Command::Collect { file, receivables } => {
            if let Some(path) = receivables {
                import(&workflow, &path).await?;
            }
            collect(&workflow, &file).await?;
        }
        Command::Pending {
            partner,
            receivables,
            json,
        } => {
            if let Some(path) = receivables {
                import(&workflow, &path).await?;
            }
            let pending = workflow.list_pending_receivables(&partner).await;
            match workflow.pending_total(&partner).await {
                Ok(total) => {
                    info!(partner = %partner, count = pending.len(), total = %total, "pending receivables")
                }
                Err(e) => warn!(partner = %partner, error = %e, "pending total unavailable"),
            }

            if json {
                serde_json::to_writer_pretty(io::stdout().lock(), &pending).into_diagnostic()?;
                println!();
            } else {
                ReceivableWriter::new(io::stdout().lock())
                    .write_receivables(pending)
                    .into_diagnostic()?;
            }
        }
        Command::Report { receivables } => {
            if let Some(path) = receivables {
                import(&workflow, &path).await?;
            }
            let all = workflow.store().all().await.into_diagnostic()?;
            ReceivableWriter::new(io::stdout().lock())
                .write_receivables(all)
                .into_diagnostic()?;
        }
    }

    Ok(())
}

fn open_store(db_path: Option<PathBuf>) -> Result<ReceivableStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryReceivableStore::new()))
        }
        None => Ok(Box::new(InMemoryReceivableStore::new())),
    }
}

async fn import(workflow: &CollectionWorkflow, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let mut imported = 0usize;
    for result in ReceivableReader::new(file).receivables() {
        match result {
            Ok(receivable) => {
                workflow.store().store(receivable).await.into_diagnostic()?;
                imported += 1;
            }
            Err(e) => warn!(error = %e, "Error reading receivable"),
        }
    }
    info!(imported, path = %path.display(), "receivables imported");
    Ok(())
}

async fn collect(workflow: &CollectionWorkflow, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    let mut writer = OutcomeWriter::new(io::stdout());
    for result in CollectionReader::new(file).requests() {
        match result {
            Ok(request) => {
                let outcome = workflow.collect_payment_outcome(request.clone()).await;
                writer.write_outcome(&request, &outcome).into_diagnostic()?;
            }
            Err(e) => warn!(error = %e, "Error reading collection"),
        }
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}
