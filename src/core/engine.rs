use crate::config::toml_config::BotConfig;
use crate::core::resolver::CommandResolver;
use crate::core::trigger::TriggerClassifier;
use crate::domain::model::{Outcome, ReferenceClock};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Entry point from a chat message to a resolved outcome.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    classifier: TriggerClassifier,
    resolver: CommandResolver,
}

impl CommandEngine {
    pub fn new(classifier: TriggerClassifier, resolver: CommandResolver) -> Self {
        Self {
            classifier,
            resolver,
        }
    }

    /// Builds the engine with the built-in alias table and default campus.
    pub fn with_bot_name(bot_name: &str) -> Result<Self> {
        Ok(Self::new(
            TriggerClassifier::new(bot_name)?,
            CommandResolver::default(),
        ))
    }

    pub fn from_config(config: &BotConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            TriggerClassifier::new(config.bot_name())?,
            CommandResolver::new(config.campus_table(), config.default_campus()),
        ))
    }

    pub fn classify_and_resolve(
        &self,
        message_text: &str,
        is_direct: bool,
        clock: &ReferenceClock,
    ) -> Outcome {
        let trigger = self.classifier.classify(message_text, is_direct);
        tracing::debug!("Trigger for '{}': {:?}", message_text, trigger);
        self.resolver.resolve(&trigger, clock)
    }
}
