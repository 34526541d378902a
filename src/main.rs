use clap::Parser;
use domainval::core::export;
use domainval::domain::model::{CellState, ReportKind, ReportResult};
use domainval::domain::ports::{AnalysisService, ConfigProvider, Storage};
use domainval::utils::logger;
use domainval::{
    CliConfig, HttpAnalysisService, LocalStorage, OfflineAnalysis, ReportAggregator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting domainval");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if config.api_key.is_empty() {
        config.api_key = std::env::var("DOMAINVAL_API_KEY").unwrap_or_default();
    }
    if config.api_key.is_empty() && !config.offline {
        eprintln!("❌ No API key configured; pass --api-key, set DOMAINVAL_API_KEY, or run with --offline");
        std::process::exit(1);
    }

    let result = if config.offline {
        tracing::info!("Offline mode: all reports come from the local valuation engine");
        run(OfflineAnalysis, &config).await
    } else {
        let service = HttpAnalysisService::new(
            config.api_base_url().to_string(),
            config.api_key().to_string(),
            config.model().to_string(),
        );
        run(service, &config).await
    };

    match result {
        Ok(()) => {
            println!("✅ Analysis of {} complete", config.domain);
            println!("📁 Report written to {}", config.output_path);
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run<S: AnalysisService, C: ConfigProvider>(
    service: S,
    config: &C,
) -> domainval::Result<()> {
    let aggregator = ReportAggregator::new(service, config.seed());
    aggregator.submit(config.domain()).await?;
    aggregator.fetch_all().await;

    let session = aggregator.snapshot().await;
    for kind in ReportKind::ALL {
        let cell = session.cell(kind);
        match cell.state {
            CellState::Loaded => tracing::info!("{}: loaded", kind),
            CellState::Errored => tracing::warn!(
                "{}: {}",
                kind,
                cell.error.as_deref().unwrap_or("failed")
            ),
            _ => {}
        }
    }

    let report = export::synthesize_report(&session)?;
    let template = export::synthesize_template(&session)?;

    let storage = LocalStorage::new(config.output_path().to_string());
    storage
        .write_file("domain-analysis.html", report.as_bytes())
        .await?;
    storage
        .write_file("landing-template.html", template.as_bytes())
        .await?;

    if let Some(ReportResult::Branding { image_url }) =
        &session.cell(ReportKind::Branding).result
    {
        println!("🎨 Brand logo: {}", image_url);
    }

    Ok(())
}
