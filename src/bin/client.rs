//! SFTS Client Binary
//!
//! Interactive command-line client for an SFTS server.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use sfts::client::Command;
use sfts::storage::DirStore;
use sfts::{Session, SftsError};
use tracing_subscriber::{fmt, EnvFilter};

/// SFTS Client
#[derive(Parser, Debug)]
#[command(name = "sfts-client")]
#[command(about = "Simple File Transfer Service client")]
#[command(version)]
struct Args {
    /// IP address or hostname of the server
    host: String,

    /// Port number on which the server is listening
    port: u16,

    /// Debug: log every frame sent and received
    #[arg(short, long)]
    debug: bool,

    /// Local directory uploads are read from and downloads saved to
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let store = match DirStore::open(&args.dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = match Session::connect((args.host.as_str(), args.port), store) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    println!("Session has been established!");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!(">> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            // End of input: leave the server the way `bye` would
            None => {
                let _ = session.execute(&Command::Bye);
                break;
            }
            Some(Err(e)) => {
                eprintln!("ERROR: {}", e);
                let _ = session.execute(&Command::Bye);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match session.execute_line(&line) {
            Ok(Some(outcome)) => println!("{}", outcome),
            Ok(None) => break,
            Err(SftsError::Network(e)) => {
                eprintln!("Connection lost: {}", e);
                std::process::exit(1);
            }
            Err(e) => println!("ERROR: {}", e),
        }
    }

    println!("client exit");
}
