pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::menu_store::JsonMenuStore;
pub use crate::config::toml_config::BotConfig;
pub use crate::core::bot::{spawn_menu_refresh, KomidaBot};
pub use crate::core::engine::CommandEngine;
pub use crate::core::{campus::resolve_campus, date::resolve_date};
pub use crate::domain::model::{
    Campus, DailyMenu, InboundMessage, Outcome, Query, ReferenceClock, ResolutionFailure,
    TriggerOutcome,
};
pub use crate::domain::ports::MenuProvider;
pub use crate::utils::error::{BotError, Result};
