use crate::core::campus::CampusTable;
use crate::domain::model::Campus;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{self, Validate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BOT_NAME: &str = "komidabot";
pub const DEFAULT_TIMEZONE: &str = "Europe/Brussels";
pub const DEFAULT_REFRESH_MINUTES: u64 = 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub bot: BotSection,
    pub menus: Option<MenuSource>,
    /// Extra aliases keyed by campus code, added to the built-in table.
    pub campuses: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSection {
    pub name: String,
    pub default_campus: Campus,
    pub timezone: String,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_BOT_NAME.to_string(),
            default_campus: Campus::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSource {
    pub path: String,
    /// Minutes between background reloads of `path`; 0 disables them.
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
}

fn default_refresh_minutes() -> u64 {
    DEFAULT_REFRESH_MINUTES
}

impl MenuSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            refresh_minutes: DEFAULT_REFRESH_MINUTES,
        }
    }
}

impl BotConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment variable, leaving unknown ones as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BotError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_single_word("bot.name", &self.bot.name)?;
        validation::validate_timezone("bot.timezone", &self.bot.timezone)?;

        if let Some(menus) = &self.menus {
            validation::validate_path("menus.path", &menus.path)?;
        }

        for (code, aliases) in &self.campuses {
            let field = format!("campuses.{}", code);
            code.parse::<Campus>()
                .map_err(|e| BotError::InvalidConfigValueError {
                    field: field.clone(),
                    value: code.clone(),
                    reason: e.to_string(),
                })?;
            for alias in aliases {
                validation::validate_non_empty_string(&field, alias)?;
            }
        }

        self.campus_table().validate()
    }

    pub fn bot_name(&self) -> &str {
        &self.bot.name
    }

    pub fn default_campus(&self) -> Campus {
        self.bot.default_campus
    }

    pub fn timezone(&self) -> Result<Tz> {
        validation::validate_timezone("bot.timezone", &self.bot.timezone)
    }

    pub fn menu_path(&self) -> Option<&str> {
        self.menus.as_ref().map(|m| m.path.as_str())
    }

    /// Period of the background menu reload, if a menu file is configured.
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.menus
            .as_ref()
            .filter(|m| m.refresh_minutes > 0)
            .map(|m| Duration::from_secs(m.refresh_minutes * 60))
    }

    /// Built-in aliases followed by the configured extras.
    pub fn campus_table(&self) -> CampusTable {
        let mut table = CampusTable::default();
        for (code, aliases) in &self.campuses {
            let Ok(campus) = code.parse::<Campus>() else {
                tracing::warn!("Skipping aliases for unknown campus code '{}'", code);
                continue;
            };
            for alias in aliases {
                table = table.with_alias(campus, alias);
            }
        }
        table
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
