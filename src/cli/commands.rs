//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;

/// Commands for the markup translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a record dataset once and write a backup
    Translate {
        /// Dataset URL to fetch records from
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Local JSON file with records
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Optional output file for the translated records
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the HTTP API server
    Serve {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

/// Handle the one-shot translate command
pub async fn handle_translate(
    url: Option<String>,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::core::pipeline::TranslationPipeline;
    use crate::core::source::{fetch_records, read_records};
    use crate::utils::backup::write_backup;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::{Duration, Instant};
    use tracing::info;

    let start_time = Instant::now();

    let pipeline = TranslationPipeline::from_env()?;

    let records = match (url, file) {
        (Some(url), _) => fetch_records(&url).await?,
        (None, Some(file)) => read_records(&file).await?,
        (None, None) => anyhow::bail!("Either --url or --file is required"),
    };

    if records.is_empty() {
        anyhow::bail!("No records to translate");
    }

    info!("Translating {} records", records.len());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("Translating {} records...", records.len()));

    let translated = pipeline.translate(records).await?;

    pb.finish_with_message("Completed");

    let backup_path = write_backup(&pipeline.config().backup_dir, &translated).await?;

    if let Some(output) = &output {
        let content = serde_json::to_string_pretty(&translated)?;
        tokio::fs::write(output, content).await?;
    }

    let duration = start_time.elapsed();
    info!("Completed: {} records in {:?}", translated.len(), duration);

    println!("\n✅ Translation completed!");
    println!("   Records: {}", translated.len());
    println!("   Backup: {}", backup_path.display());
    if let Some(output) = output {
        println!("   Output: {}", output.display());
    }
    println!("   Time: {:?}", duration);

    Ok(())
}

/// Handle the serve command
pub async fn handle_serve(host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("📊 OpenAPI document: http://{}:{}/api-docs/openapi.json", host, port);

    run_server(host, port).await?;

    Ok(())
}
