use clap::Parser;
use series_builder::utils::{logger, validation::Validate};
use series_builder::{
    BuildConfig, CliConfig, DefaultProjector, LocalStorage, SeriesEngine, SeriesListBuilder,
    SeriesWriter, SourceGameGenerator,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("📁 Loading build configuration from: {}", cli.config);

    let mut config = match BuildConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Some(output_path) = &cli.output_path {
        config.output.path = output_path.clone();
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if cli.dry_run {
        print_build_plan(&config);
        return Ok(());
    }

    // 來源路徑相對於配置檔所在目錄
    let source_root = Path::new(&cli.config)
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());

    let generator = SourceGameGenerator::new(LocalStorage::new(source_root));
    let builder = SeriesListBuilder::new(generator, DefaultProjector)
        .with_concurrency(config.concurrency());
    let writer = SeriesWriter::from_config(LocalStorage::new(config.output_path().to_string()), &config);
    let engine = SeriesEngine::new(builder, writer);

    match engine.run(&config.lists).await {
        Ok(output_path) => {
            println!("✅ Series build completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Series build failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn print_build_plan(config: &BuildConfig) {
    println!("📋 Build plan: {}", config.build.name);
    if let Some(description) = &config.build.description {
        println!("   {}", description);
    }
    println!("   concurrency: {}", config.concurrency());
    println!("   output: {}", config.output_path());

    for list in &config.lists {
        let target = list
            .target_team
            .as_deref()
            .map(|t| format!(", target team {}", t))
            .unwrap_or_default();
        println!("  • {} [{}] type={}{}", list.name, list.url_slug, list.list_type, target);
        for series in &list.series {
            println!(
                "      - {} ({:?}) from {}",
                series.series_name.as_deref().unwrap_or("(unnamed)"),
                series.series_id,
                series.source.describe()
            );
        }
    }
}
