//! SFTS Server Binary
//!
//! Serves a directory over the SFTS protocol.

use std::path::PathBuf;

use clap::Parser;
use sfts::storage::DirStore;
use sfts::{Config, Server};
use tracing_subscriber::{fmt, EnvFilter};

/// SFTS Server
#[derive(Parser, Debug)]
#[command(name = "sfts-server")]
#[command(about = "Simple File Transfer Service server")]
#[command(version)]
struct Args {
    /// Port number on which the server listens
    port: u16,

    /// Debug: log every frame sent and received
    #[arg(short, long)]
    debug: bool,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory files are stored in
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "16")]
    max_connections: usize,

    /// Read timeout per connection in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout per connection in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .init();

    tracing::info!("SFTS Server v{}", sfts::VERSION);
    tracing::info!("Storage directory: {}", args.dir.display());

    // Build config from args
    let config = Config::builder()
        .root_dir(&args.dir)
        .listen_addr(format!("{}:{}", args.host, args.port))
        .max_connections(args.max_connections)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    let store = match DirStore::open(&config.root_dir) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open storage directory: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::bind(config, store) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
