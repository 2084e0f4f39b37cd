use clap::Parser;
use deck_fetch::app::deck_session;
use deck_fetch::core::ConfigProvider;
use deck_fetch::utils::{logger, validation::Validate};
use deck_fetch::DeckConfig;

#[derive(Parser)]
#[command(name = "toml-deck")]
#[command(about = "Fetches a deck described by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "deck.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the deck size from config
    #[arg(long)]
    deck_size: Option<usize>,

    /// Dry run - list the addresses that would be fetched
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based deck fetch");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match DeckConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(size) = args.deck_size {
        config.deck.size = size;
        tracing::info!("🔧 Deck size overridden to: {}", size);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests will be sent");
        for address in deck_session::planned_addresses(&config) {
            println!("GET {}", address);
        }
        return Ok(());
    }

    match deck_session::run(&config).await {
        Ok(outcome) => {
            for card in &outcome.cards {
                println!("{} - {}", card.title(), card.description());
            }
            println!(
                "✅ {} of {} cards fetched",
                outcome.summary.appended,
                config.deck_size()
            );
            if let Some(path) = outcome.output_path {
                println!("📁 Deck saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!("❌ Fetch session failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    }

    Ok(())
}
