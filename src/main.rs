use clap::Parser;
use land_cost_estimator::app::export::export_estimate;
use land_cost_estimator::core::format::Summary;
use land_cost_estimator::utils::validation::{check_inputs, Validate};
use land_cost_estimator::utils::{error::Result, logger};
use land_cost_estimator::{CliConfig, FormSession, LocalStorage, StdoutNotifier};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting land-cost estimator");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Estimation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(config: &CliConfig) -> Result<()> {
    // 驗證配置
    config.validate()?;
    let file_config = config.load_file_config()?;

    let estimator = config.build_estimator(&file_config)?;
    for warning in check_inputs(estimator.input()) {
        tracing::warn!("⚠️ {}", warning);
    }

    let storage = LocalStorage::new(".".to_string());

    if config.interactive {
        let mut session = FormSession::new(estimator, StdoutNotifier, storage);
        let stdin = std::io::stdin();
        session.run(stdin.lock(), std::io::stdout().lock())?;
        return Ok(());
    }

    let estimate = estimator.estimate();
    if config.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("Mode: {}", estimate.mode);
        print!("{}", Summary::new(estimate.mode, &estimate.output));
    }

    if config.submit {
        estimator.submit(&StdoutNotifier)?;
    }

    if let Some(path) = config.export_path(&file_config) {
        let written = export_estimate(&storage, path, &estimate)?;
        println!("📁 Output saved to: {}", written);
    }

    Ok(())
}
