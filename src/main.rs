use clap::Parser;
use deck_fetch::app::deck_session::{self, SessionOutcome};
use deck_fetch::utils::{logger, validation::Validate};
use deck_fetch::CliConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting deck-fetch CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match deck_session::run(&config).await {
        Ok(outcome) => print_deck(&outcome),
        Err(e) => {
            tracing::error!("❌ Fetch session failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(if e.is_config_error() { 1 } else { 2 });
        }
    }

    Ok(())
}

fn print_deck(outcome: &SessionOutcome) {
    for (i, card) in outcome.cards.iter().enumerate() {
        println!("{:>3}. {}", i + 1, card.title());
        println!("     {}", card.description());
        match outcome.faces.get(i) {
            Some(Some(size)) => println!("     {} ({} bytes)", card.image(), size),
            Some(None) => println!("     {} (no image)", card.image()),
            None => println!("     {}", card.image()),
        }
    }

    let summary = &outcome.summary;
    println!(
        "✅ {} of {} cards fetched ({} rejected, {} undelivered)",
        summary.appended,
        summary.requested,
        summary.rejected(),
        summary.undelivered()
    );
    if let Some(path) = &outcome.output_path {
        println!("📁 Deck saved to: {}", path);
    }
}
