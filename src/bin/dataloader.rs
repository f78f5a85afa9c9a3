//! Loader Binary
//!
//! Runs the load pipeline for object keys given on the command line or
//! for an S3 notification document, then prints the JSON response.
//!
//! Options: --event <path|->, --local <dir>

use anyhow::Context;
use clap::Parser;
use dataloader::Logger;
use dataloader::config::Config;
use dataloader::event::S3Event;
use dataloader::loader::Loader;
use dataloader::storage::Buckets;
use dataloader::warehouse;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data file keys to load, in order.
    #[arg(conflicts_with = "event")]
    keys: Vec<String>,
    /// S3 notification JSON to process; `-` reads stdin.
    #[arg(long)]
    event: Option<String>,
    /// Read buckets from subdirectories of this directory instead of S3.
    #[arg(long)]
    local: Option<PathBuf>,
}

impl Args {
    fn event(&self) -> anyhow::Result<S3Event> {
        let json = match self.event.as_deref() {
            None => return Ok(S3Event::keys(self.keys.iter().cloned())),
            Some("-") => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer).context("read event from stdin")?;
                buffer
            }
            Some(path) => std::fs::read_to_string(path).with_context(|| format!("read event {}", path))?,
        };
        S3Event::try_from(json.as_str()).context("decode event")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;
    let logger = Logger::stdout(config.debug).with("request_id", request_id());
    kys(logger.clone());

    let event = args.event()?;
    let buckets = [config.schema_bucket.as_str()];
    let storage = match args.local {
        Some(ref root) => Buckets::local(root, buckets)?,
        None => Buckets::s3(buckets)?,
    };
    let client = warehouse::connect(&logger, &config.database).await?;
    let loader = Loader::new(storage, client, config.origin(), &config.schema_bucket)
        .with_timeout(config.timeout);

    let response = dataloader::event::handle(&loader, &logger, &event).await?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Per-process invocation id, for correlating log lines.
fn request_id() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{:x}-{:x}", nanos, std::process::id())
}

/// Ctrl+C exits immediately. A COPY already sent keeps running in the
/// warehouse.
fn kys(logger: Logger) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            logger.warn("interrupt received, exiting immediately", &[]);
            std::process::exit(130);
        }
    });
}
