mod cli;
mod config;
mod gallery;
mod model;
mod store;
mod tui;

use std::fs::{self, File};
use std::io::Write;
use std::process;
use std::sync::{Arc, Mutex, PoisonError};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;
use store::PoiStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    if let Some(uri) = cli.uri {
        config.uri = uri;
    }

    // Logging goes to a file: the terminal belongs to the UI.
    if let Some(path) = config.log_path() {
        if let Err(e) = init_tracing(&path) {
            eprintln!("Failed to open log file {}: {e}", path.display());
            process::exit(1);
        }
    }

    let store = match PoiStore::connect(&config).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to connect to {}: {e}", config.uri);
            process::exit(1);
        }
    };

    if let Err(e) = tui::run(store, &config).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Route log lines to the given file, filtered by `RUST_LOG` (default `info`).
fn init_tracing(path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;
    let file = Arc::new(Mutex::new(file));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let make_writer = move || LogWriter {
        file: Arc::clone(&file),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(make_writer)
        .init();
    Ok(())
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}
