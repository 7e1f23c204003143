//! BucketKV CLI
//!
//! Loads JSON records into an in-memory store and runs a single command
//! against it. Nothing is persisted between runs.

use std::path::PathBuf;
use std::process;

use bucketkv::config::{DEFAULT_CAPACITY, DEFAULT_DATA_FILE};
use bucketkv::{loader, render, Config, Result, Store};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// BucketKV CLI
#[derive(Parser, Debug)]
#[command(name = "bucketkv")]
#[command(about = "Composite-key store backed by hash-bucketed AVL trees")]
#[command(version)]
struct Args {
    /// Number of hash buckets
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Records file preloaded before get-item and query
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load records from a JSON file
    PutItem {
        /// JSON array of records
        file: PathBuf,
    },

    /// Look up one record by the keys in a JSON file
    GetItem {
        /// JSON object with note_holder and note_created_date
        file: PathBuf,
    },

    /// List every record of a partition, ordered by sort key
    Query {
        /// The partition key (note_holder)
        partition_key: String,
    },
}

fn main() {
    // Logs go to stderr; stdout carries command output only
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,bucketkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .capacity(args.capacity)
        .data_file(&args.data)
        .build();

    if let Err(e) = run(&config, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(config: &Config, command: Commands) -> Result<()> {
    let mut store = Store::open(config)?;
    tracing::debug!(capacity = store.capacity(), "store opened");

    match command {
        Commands::PutItem { file } => {
            loader::put_items(&mut store, &file)?;
            println!("Success");
        }
        Commands::GetItem { file } => {
            loader::put_items(&mut store, &config.data_file)?;
            let key = loader::read_query(&file)?;
            let payload = store.get(&key.partition_key, &key.sort_key);
            println!("{}", render::format_lookup(&key, payload));
        }
        Commands::Query { partition_key } => {
            loader::put_items(&mut store, &config.data_file)?;
            let records = store.scan_partition(&partition_key);
            println!("{}", render::format_partition(&partition_key, &records));
        }
    }

    Ok(())
}
