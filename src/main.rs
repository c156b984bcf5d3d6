use clap::Parser;
use scrape_hub::config::settings::Settings;
use scrape_hub::core::engine::home_menu;
use scrape_hub::domain::ports::ConfigProvider;
use scrape_hub::utils::error::{ErrorSeverity, HubError};
use scrape_hub::utils::{logger, validation::Validate};
use scrape_hub::{
    BackendClient, CliConfig, Command, HubEngine, LocalStorage, OutputOptions, RunSummary,
    TwitterSource, YoutubeSource,
};


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting scrape-hub CLI");
    tracing::debug!("CLI config: {:?}", config);

    let Some(command) = config.command.clone() else {
        println!("{}", home_menu());
        return Ok(());
    };

    // 驗證配置
    let settings = match config.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Effective settings: {:?}", settings);

    let summary = match run_command(&command, &settings).await {
        Ok(summary) => summary,
        Err(e) => exit_with(&e),
    };

    if let Some(message) = &summary.error {
        eprintln!("❌ {}", message);
        std::process::exit(ErrorSeverity::Medium.exit_code());
    }

    match &summary.written_to {
        Some(path) => println!("📁 {} rows saved to: {}", summary.rows, path),
        None => println!("{}", summary.rendered),
    }

    Ok(())
}

async fn run_command(command: &Command, settings: &Settings) -> scrape_hub::Result<RunSummary> {
    let client = BackendClient::new(settings.base_url());
    let options = OutputOptions::from_config(settings);
    let engine = HubEngine::new(client, LocalStorage::new("."), options);

    match command {
        Command::Youtube { .. } => {
            engine
                .run(YoutubeSource::new(settings.youtube_max_results()))
                .await
        }
        Command::Twitter { .. } => engine.run(TwitterSource::new(settings.twitter_limit())).await,
    }
}

fn exit_with(e: &HubError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
