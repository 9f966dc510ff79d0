//! Entry point and CLI parsing for the favicon discovery tool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use favscan::export::write_csv;
use favscan::{ClientConfig, FaviconError, Finder, Icon, RequestOptions};
use log::{error, info};
use sha2::{Digest, Sha256};

#[derive(Parser)]
#[command(name = "favscan", about = "Find and rank the favicons of a web page")]
struct Cli {
    /// Page to inspect.
    url: String,

    /// Request header as 'Name: value'. Replaces the default headers; repeatable.
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum redirects followed per request.
    #[arg(long, default_value_t = 10)]
    max_redirects: usize,

    /// Write the ranked icons to a CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Download the best icon to this path.
    #[arg(long)]
    download: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = RequestOptions::default();
    if !cli.headers.is_empty() {
        options = options.with_headers(cli.headers.clone());
    }
    if let Some(secs) = cli.timeout {
        options = options.with_timeout(Duration::from_secs(secs));
    }

    let finder = match Finder::with_config(&ClientConfig::new(cli.max_redirects)) {
        Ok(finder) => finder,
        Err(e) => {
            error!("Failed to create HTTP client: {e}.");
            std::process::exit(1);
        }
    };

    // Build tokio current thread runtime, one page needs no parallelism.
    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}.");
            std::process::exit(1);
        }
    };

    let icons = match rt.block_on(finder.discover(&cli.url, &options)) {
        Ok(icons) => icons,
        Err(e) => {
            error!("Icon discovery failed: {e}.");
            std::process::exit(1);
        }
    };

    if icons.is_empty() {
        println!("No icons found for {}", cli.url);
        std::process::exit(1);
    }

    println!("Found {} icons:", icons.len());
    for (i, icon) in icons.iter().enumerate() {
        println!("[{}] {icon}", i + 1);
    }

    if let Some(path) = &cli.csv {
        match write_csv(&icons, path) {
            Ok(()) => info!("CSV written to {}.", path.display()),
            Err(e) => {
                error!("Failed to write CSV: {e}.");
                std::process::exit(1);
            }
        }
    }

    if let Some(path) = &cli.download
        && let Err(e) = rt.block_on(save_icon(&finder, &icons[0], &options, path))
    {
        error!("Failed to download {}: {e}.", icons[0].url());
        std::process::exit(1);
    }
}

/// Download an icon, write it to `path` and log its digest.
async fn save_icon(
    finder: &Finder,
    icon: &Icon,
    options: &RequestOptions,
    path: &Path,
) -> Result<(), FaviconError> {
    let bytes = finder.download(icon, options).await?;

    std::fs::write(path, &bytes)
        .map_err(|source| FaviconError::Io { path: path.to_path_buf(), source })?;

    let hash = format!("{:x}", Sha256::digest(&bytes));
    info!("Saved {} ({} bytes, sha256 {hash}) to {}.", icon.url(), bytes.len(), path.display());
    Ok(())
}

/// Parse a `Name: value` header argument.
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) =
        raw.split_once(':').ok_or_else(|| format!("expected 'Name: value', got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in '{raw}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
