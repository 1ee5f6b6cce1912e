use anyhow::Context;
use clap::Parser;
use mobile_spec_etl::core::pipeline::read_raw_records;
use mobile_spec_etl::core::ConfigProvider;
use mobile_spec_etl::utils::error::ErrorSeverity;
use mobile_spec_etl::utils::{logger, validation::Validate};
use mobile_spec_etl::{EtlEngine, LocalStorage, SpecPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Spec normalization ETL driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "etl-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the parallel setting from config
    #[arg(long)]
    parallel: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(args.verbose, config.log_level(), config.json_logs());
    tracing::info!("🚀 Starting TOML-based spec ETL");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(parallel) = args.parallel {
        config.transform.parallel = Some(parallel);
        tracing::info!("🔧 Parallel parsing overridden to: {}", parallel);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        return perform_dry_run(&config).await;
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SpecPipeline::new(storage, config)?;
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ ETL process completed successfully!");
            println!("✅ ETL process completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

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
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name,
        config.pipeline.version.as_deref().unwrap_or("0")
    );
    println!("  Source: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Parallel: {}", config.parallel());

    if let Some(archive) = config.compression() {
        println!("  Compression: {} (ZIP)", archive);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

/// 讀取並解析輸入檔，只回報筆數，不寫出任何檔案
async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let data = tokio::fs::read(config.input_path())
        .await
        .with_context(|| format!("reading input file {}", config.input_path()))?;
    let batch = read_raw_records(&data, config.delimiter())?;

    println!("📥 Input Analysis:");
    println!("  Rows read: {}", batch.records.len() + batch.rejected.len());
    println!("  Records accepted: {}", batch.records.len());
    println!("  Rows rejected: {}", batch.rejected.len());
    for rejected in batch.rejected.iter().take(5) {
        println!("    row {}: {}", rejected.row, rejected.reason);
    }

    let calibration = config.calibration();
    println!();
    println!("⚙️ Calibration:");
    println!("  Chipset vendors: {}", calibration.chipset_vendors.len());
    println!("  Charging ports: {}", calibration.charging_ports.join(", "));
    println!("  Missing-value sentinel: {}", calibration.missing_sentinel);

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
