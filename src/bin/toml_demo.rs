use bookstore_demo::app::steps;
use bookstore_demo::config::toml_config::{QueriesConfig, TomlConfig};
use bookstore_demo::utils::error::ErrorSeverity;
use bookstore_demo::utils::{logger, validation::Validate};
use bookstore_demo::{DemoEngine, LocalReportSink, MongoBookStore};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-demo")]
#[command(about = "Bookstore query tour driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "demo-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override read-only setting from config
    #[arg(long)]
    read_only: Option<bool>,

    /// Dry run - show the configuration and planned steps without connecting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based bookstore demo");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(read_only) = args.read_only {
        config
            .queries
            .get_or_insert_with(|| QueriesConfig {
                page_size: None,
                read_only: None,
            })
            .read_only = Some(read_only);
        tracing::info!("🔧 Read-only mode overridden to: {}", read_only);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No connection will be made");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let store = match MongoBookStore::connect(
        &config.connection.uri,
        &config.connection.database,
        &config.connection.collection,
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

    let report_sink = config
        .report_path_value()
        .map(|p| LocalReportSink::new(p.to_string()));
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Demo: {} v{}", config.demo.name, config.demo.version);
    println!("  URI: {}", config.connection.uri);
    println!(
        "  Collection: {}/{}",
        config.connection.database, config.connection.collection
    );
    println!("  Page Size: {}", config.page_size());
    println!("  Read Only: {}", config.is_read_only());
    println!("  Seed: {}", config.seed_enabled());

    if let Some(path) = config.report_path_value() {
        println!("  Report Path: {}", path);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();
    println!("🗒️ Planned steps (in order):");

    let tour = steps::full_tour(config.page_size());
    let mut current_section = "";

    for (index, step) in tour.iter().enumerate() {
        if step.section() != current_section {
            current_section = step.section();
            println!("  [{}]", current_section);
        }
        println!("    {:2}. {}", index + 1, step.name());
    }

    println!();
    if config.is_read_only() {
        println!("  🔒 Read-only: seed, update, delete and index steps will be skipped");
    }
    if !config.seed_enabled() {
        println!("  ⏭️ Seeding disabled: the seed step will be skipped");
    }

    println!();
    println!("✅ Dry run analysis complete. Run without --dry-run to execute.");
}
