use anyhow::Result;
use chrono::NaiveDate;
use komidabot::utils::validation::Validate;
use komidabot::core::campus::CampusTable;
use komidabot::core::resolver::CommandResolver;
use komidabot::core::trigger::TriggerClassifier;
use komidabot::{
    BotConfig, BotError, Campus, CommandEngine, InboundMessage, JsonMenuStore, KomidaBot,
    Outcome, ReferenceClock, ResolutionFailure,
};
use tempfile::TempDir;

fn friday() -> ReferenceClock {
    ReferenceClock::at_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
}

const MENUS: &str = r#"[
  {
    "campus": "cst",
    "date": "2024-03-16",
    "items": [
      {"kind": "vegetarian", "name": "Falafel", "price_student": 3.2, "price_staff": 4.1},
      {"kind": "soup", "name": "Minestrone", "price_student": 0.8, "price_staff": 1.2}
    ]
  },
  {
    "campus": "cmi",
    "date": "2024-03-15",
    "items": [
      {"kind": "grill", "name": "Steak", "price_student": 6.0, "price_staff": 7.5}
    ]
  }
]"#;

#[tokio::test]
async fn test_bot_from_config_and_menu_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let menus_path = temp_dir.path().join("menus.json");
    tokio::fs::write(&menus_path, MENUS).await?;

    let config_content = format!(
        r#"
[bot]
name = "lunchbot"

[menus]
path = "{}"

[campuses]
cst = ["downtown"]
"#,
        menus_path.to_str().unwrap().replace('\\', "/")
    );
    let config_path = temp_dir.path().join("komidabot.toml");
    tokio::fs::write(&config_path, config_content).await?;

    let config = BotConfig::from_file(&config_path)?;
    config.validate()?;

    let engine = CommandEngine::from_config(&config)?;
    let store = JsonMenuStore::open(config.menu_path().unwrap()).await?;
    let bot = KomidaBot::new(engine, store);

    let reply = bot
        .handle(&InboundMessage::channel("@lunchbot downtown tomorrow"), &friday())
        .await?
        .expect("addressed message gets a reply");
    assert_eq!(
        reply,
        "*LUNCH!*\n\
         *Menu komida CST on Saturday 16 March*\n\
         :tea: Minestrone (€0.80 / €1.20)\n\
         :tomato: Falafel (€3.20 / €4.10)"
    );

    let reply = bot
        .handle(&InboundMessage::channel("Luuunch!!"), &friday())
        .await?
        .expect("lunch pattern gets a reply");
    assert!(reply.contains(":meat_on_bone: Steak (€6.00 / €7.50)"));

    let reply = bot
        .handle(&InboundMessage::direct("cde monday"), &friday())
        .await?
        .expect("direct message gets a reply");
    assert!(reply.contains("no menu has been found for CDE on Monday 18 March"));

    let reply = bot
        .handle(&InboundMessage::channel("@komidabot cmi"), &friday())
        .await?;
    assert!(reply.is_none(), "old bot name is no longer a trigger");

    Ok(())
}

#[tokio::test]
async fn test_refresh_picks_up_new_menus() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let menus_path = temp_dir.path().join("menus.json");
    tokio::fs::write(&menus_path, "[]").await?;

    let store = JsonMenuStore::open(&menus_path).await?;
    let bot = KomidaBot::new(CommandEngine::with_bot_name("komidabot")?, store);
    assert!(bot.menus().is_empty().await);

    tokio::fs::write(&menus_path, MENUS).await?;
    let reply = bot
        .handle(&InboundMessage::direct("stad tomorrow"), &friday())
        .await?
        .unwrap();
    assert!(reply.contains("Falafel"));
    assert_eq!(bot.menus().len().await, 2);

    Ok(())
}

#[test]
fn test_conflicting_aliases_rejected_at_startup() {
    let config = BotConfig::from_toml_str("[campuses]\ncde = [\"middelheim\"]").unwrap();
    assert!(matches!(
        CommandEngine::from_config(&config),
        Err(BotError::AliasConflict { .. })
    ));
}

#[tokio::test]
async fn test_ambiguous_campus_reply() -> Result<()> {
    let table = CampusTable::default().with_alias(Campus::DrieEiken, "stad");
    let engine = CommandEngine::new(
        TriggerClassifier::new("komidabot")?,
        CommandResolver::new(table, Campus::Middelheim),
    );
    assert!(matches!(
        engine.classify_and_resolve("komidabot stad", false, &friday()),
        Outcome::Failure(ResolutionFailure::AmbiguousCampus { .. })
    ));

    let bot = KomidaBot::new(engine, JsonMenuStore::in_memory(Vec::new()));
    let reply = bot
        .handle(&InboundMessage::channel("komidabot stad"), &friday())
        .await?
        .unwrap();
    assert!(reply.contains("could not understand which campus"));
    Ok(())
}
