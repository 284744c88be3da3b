//! Decides whether a chat message is addressed to the bot.

use crate::domain::model::TriggerOutcome;
use crate::utils::error::{BotError, Result};
use crate::utils::validation;
use regex::Regex;

const LUNCH_PATTERN: &str = r"(?i)^l+u+n+c+h+!+$";

#[derive(Debug, Clone)]
pub struct TriggerClassifier {
    mention: Regex,
    lunch: Regex,
}

impl TriggerClassifier {
    /// Fails on an empty or multi-word name, which would match every message.
    pub fn new(bot_name: &str) -> Result<Self> {
        validation::validate_single_word("bot.name", bot_name)?;
        let mention = Regex::new(&format!(r"(?i)@?\b{}\b", regex::escape(bot_name.trim())))
            .map_err(|e| BotError::ConfigError {
                message: format!("cannot build mention pattern for '{}': {}", bot_name, e),
            })?;
        let lunch = Regex::new(LUNCH_PATTERN).map_err(|e| BotError::ConfigError {
            message: format!("invalid lunch pattern: {}", e),
        })?;
        Ok(Self { mention, lunch })
    }

    /// Classifies `text`; direct messages are always addressed.
    pub fn classify(&self, text: &str, is_direct: bool) -> TriggerOutcome {
        let text = text.trim();

        if self.lunch.is_match(text) {
            return TriggerOutcome::AddressedDefault;
        }

        let mentioned = self.mention.is_match(text);
        if !is_direct && !mentioned {
            return TriggerOutcome::NotAddressed;
        }

        let remainder = if mentioned {
            self.mention.replace_all(text, " ").into_owned()
        } else {
            text.to_string()
        };
        let remainder = remainder.split_whitespace().collect::<Vec<_>>().join(" ");

        if remainder.is_empty() {
            TriggerOutcome::AddressedDefault
        } else {
            TriggerOutcome::AddressedWithPhrase(remainder)
        }
    }
}
