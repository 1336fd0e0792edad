//! Server job commands.

use std::time::Duration;

use console::style;
use serde_json::json;
use tracing::debug;

use na_api::JobState;
use na_core::config::ApiConfig;
use na_core::error::NaResult;

use super::{create_driver, print_value};
use crate::OutputFormat;

/// Show one job, optionally polling until it finishes.
pub async fn job(
    config: &ApiConfig,
    mbpkgid: u64,
    job_id: u64,
    wait: bool,
    interval: u64,
    format: OutputFormat,
) -> NaResult<()> {
    let driver = create_driver(config)?;
    let mut status = driver.job_status(mbpkgid, &json!({ "id": job_id }));

    while wait && status.is_working().await? {
        debug!("job {job_id} still working, polling again in {interval}s");
        tokio::time::sleep(Duration::from_secs(interval.max(1))).await;
        status.refresh().await?;
    }

    let job = status.job().await?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(job).unwrap_or_default());
        }
        OutputFormat::Text => {
            let state = match job.state() {
                JobState::Working => style("working").yellow().to_string(),
                JobState::Success => style("success").green().to_string(),
                JobState::Failure => style("failed").red().to_string(),
                JobState::Other(code) => style(format!("status {code}")).dim().to_string(),
            };
            println!("{}", style(format!("Job {}", job.id)).bold().underlined());
            println!("  Server:   {mbpkgid}");
            println!("  Command:  {}", job.command);
            println!("  State:    {state}");
            match job.inserted_at() {
                Some(at) => println!("  Inserted: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                None if !job.ts_insert.is_empty() => println!("  Inserted: {}", job.ts_insert),
                None => {}
            }
        }
    }
    Ok(())
}

/// List the jobs of a server.
pub async fn jobs(config: &ApiConfig, mbpkgid: u64, format: OutputFormat) -> NaResult<()> {
    let driver = create_driver(config)?;
    print_value(&driver.get_jobs(mbpkgid).await?, format);
    Ok(())
}
