use std::path::Path;

use anyhow::Context;
use bytes::Bytes;

use compliance_tracker::config::{APP_NAME, APP_VERSION};
use compliance_tracker::uploader::UploadStatus;
use compliance_tracker::utils::format_file_size;
use compliance_tracker::{ComplianceClient, Environment, UploadClient, UploadQueue};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let env = Environment::from_env();
    log::info!("Backend: {}", env.api_base_url);

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("Usage: compliance-tracker <report.csv> [report.csv ...]");
        std::process::exit(2);
    }

    let queue = UploadQueue::new();
    for path in &paths {
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.clone());
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path))?;

        match queue.add_file(&name, Bytes::from(data)) {
            Ok(_) => {}
            Err(e) => eprintln!("Skipping {}: {}", name, e),
        }
    }

    if queue.is_empty() {
        anyhow::bail!("no valid reports to upload");
    }

    let client = UploadClient::new(&env)?;
    let summary = queue.upload_all(&client).await?;

    for entry in queue.entries() {
        let size = format_file_size(entry.size);
        match entry.status {
            UploadStatus::Success => println!("  {} ({}) uploaded", entry.name, size),
            UploadStatus::Error => println!(
                "  {} ({}) failed: {}",
                entry.name,
                size,
                entry.error.as_deref().unwrap_or("unknown error")
            ),
            _ => println!("  {} ({}) {:?}", entry.name, size, entry.status),
        }
    }
    println!(
        "{}/{} reports uploaded, {} failed",
        summary.successful, summary.submitted, summary.failed
    );

    let api = ComplianceClient::new(&env)?;
    let dashboard = api.dashboard_data().await;
    println!(
        "Compliance score {:.1}: {} passing, {} failing, {} warnings",
        dashboard.overall_score, dashboard.passing, dashboard.failing, dashboard.warnings
    );

    Ok(())
}
