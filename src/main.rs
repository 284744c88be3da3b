use chrono::Utc;
use clap::Parser;
use komidabot::utils::error::ErrorSeverity;
use komidabot::utils::{logger, validation::Validate};
use komidabot::{
    spawn_menu_refresh, BotConfig, BotError, Campus, CliConfig, CommandEngine, InboundMessage,
    JsonMenuStore, KomidaBot, ReferenceClock,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

fn exit_with(e: &BotError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
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
    std::process::exit(exit_code)
}

fn load_config(cli: &CliConfig) -> komidabot::Result<BotConfig> {
    cli.validate()?;
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            BotConfig::from_file(path)?
        }
        None => BotConfig::default(),
    };
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = load_config(&cli).unwrap_or_else(|e| exit_with(&e));
    let timezone = config.timezone().unwrap_or_else(|e| exit_with(&e));
    let engine = CommandEngine::from_config(&config).unwrap_or_else(|e| exit_with(&e));
    let table = config.campus_table();
    for campus in Campus::ALL {
        tracing::debug!(
            "{} ({}): {}",
            campus.display_name(),
            campus,
            table.aliases_for(campus).join(", ")
        );
    }

    let menus = match config.menu_path() {
        Some(path) => JsonMenuStore::open(path)
            .await
            .unwrap_or_else(|e| exit_with(&e)),
        None => {
            tracing::warn!("No menu file configured, every lookup will come back empty");
            JsonMenuStore::in_memory(Vec::new())
        }
    };
    let menus = Arc::new(menus);
    let refresh_task = config.refresh_interval().map(|period| {
        tracing::info!("⏰ Reloading menus every {} minutes", period.as_secs() / 60);
        spawn_menu_refresh(menus.clone(), period)
    });
    let bot = KomidaBot::new(engine, menus);

    let clock = || match cli.date {
        Some(date) => ReferenceClock::at_date(date),
        None => ReferenceClock::from_utc(Utc::now(), timezone),
    };
    let message = |text: &str| {
        if cli.direct {
            InboundMessage::direct(text)
        } else {
            InboundMessage::channel(text)
        }
    };

    if let Some(text) = &cli.message {
        if let Some(reply) = bot.handle(&message(text), &clock()).await? {
            println!("{}", reply);
        }
        if let Some(task) = refresh_task {
            task.abort();
        }
        return Ok(());
    }

    tracing::info!("🚀 {} is listening on stdin", config.bot_name());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match bot.handle(&message(&line), &clock()).await {
            Ok(Some(reply)) => println!("{}\n", reply),
            Ok(None) => tracing::debug!("No reply for '{}'", line),
            Err(e) => tracing::error!("❌ Failed to answer '{}': {}", line, e),
        }
    }

    if let Some(task) = refresh_task {
        task.abort();
    }

    Ok(())
}
