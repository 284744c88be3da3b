pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "komidabot")]
#[command(about = "Answers cafeteria menu requests for the university campuses")]
pub struct CliConfig {
    /// Message to answer; lines are read from stdin when omitted
    pub message: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Menu JSON file, overrides [menus] path from the config
    #[arg(long)]
    pub menus: Option<String>,

    /// Treat messages as direct messages to the bot
    #[arg(long)]
    pub direct: bool,

    /// Override the bot name from the config
    #[arg(long)]
    pub bot_name: Option<String>,

    /// Resolve relative dates against this day instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Folds command line overrides into the file configuration.
    pub fn apply_to(&self, config: &mut toml_config::BotConfig) {
        if let Some(name) = &self.bot_name {
            config.bot.name = name.clone();
        }
        if let Some(path) = &self.menus {
            match &mut config.menus {
                Some(source) => source.path = path.clone(),
                None => config.menus = Some(toml_config::MenuSource::new(path.clone())),
            }
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.bot_name {
            validation::validate_single_word("--bot-name", name)?;
        }
        if let Some(path) = &self.config {
            validation::validate_path("--config", path)?;
        }
        if let Some(path) = &self.menus {
            validation::validate_path("--menus", path)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_and_apply_overrides() {
        let cli = CliConfig::parse_from([
            "komidabot",
            "--direct",
            "--bot-name",
            "lunchbot",
            "--menus",
            "menus.json",
            "--date",
            "2024-03-15",
            "stad tomorrow",
        ]);
        assert!(cli.validate().is_ok());
        assert!(cli.direct);
        assert_eq!(cli.message.as_deref(), Some("stad tomorrow"));
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 3, 15));

        let mut config = toml_config::BotConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.bot_name(), "lunchbot");
        assert_eq!(config.menu_path(), Some("menus.json"));
    }

    #[test]
    fn test_rejects_multi_word_bot_name() {
        let cli = CliConfig::parse_from(["komidabot", "--bot-name", "two words"]);
        assert!(cli.validate().is_err());
    }
}
