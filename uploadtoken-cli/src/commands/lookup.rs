//! One-shot lookup command
//!
//! Same lookup and formatting as `GET /{org}/{repo}`, printed to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use uploadtoken_server::{lookup_upload_token, ResponseFormat, UploadTokenStore};

use super::DatabaseArgs;

/// Arguments for the lookup command
#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// Owner username (exact match)
    pub org: String,

    /// Repository name (exact match)
    pub repo: String,

    /// Output format: `text`/`plain` prints the bare token, anything else prints JSON
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_lookup(args: LookupArgs) -> Result<()> {
    let store = args.db.connect().await?;
    let mut session = store
        .session()
        .await
        .context("Failed to acquire database connection")?;

    let record = lookup_upload_token(session.as_mut(), &args.org, &args.repo)
        .await
        .with_context(|| format!("{}/{}", args.org, args.repo))?;

    match ResponseFormat::from_query(args.format.as_deref()) {
        ResponseFormat::PlainText => println!("{}", record.upload_token),
        ResponseFormat::Json => println!("{}", serde_json::to_string(&record)?),
    }

    Ok(())
}
