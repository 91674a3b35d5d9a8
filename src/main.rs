use bookstore_demo::utils::error::ErrorSeverity;
use bookstore_demo::utils::{logger, validation::Validate};
use bookstore_demo::{CliConfig, DemoEngine, LocalReportSink, MongoBookStore};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting bookstore-demo CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let store = match MongoBookStore::connect(
        &config.connection_uri,
        &config.database,
        &config.collection,
    )
    .await
    {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("❌ Connection failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    let report_sink = config.report_path.clone().map(LocalReportSink::new);
    let engine = DemoEngine::new_with_monitoring(config, report_sink, monitor_enabled);

    match engine.run(&store).await {
        Ok(summary) => {
            tracing::info!("✅ Query tour completed successfully!");
            println!(
                "✅ Query tour completed: {} steps, {} documents",
                summary.executed_steps, summary.total_documents
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Query tour failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
