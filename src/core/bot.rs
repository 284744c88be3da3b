use crate::adapters::formatter;
use crate::core::engine::CommandEngine;
use crate::domain::model::{DailyMenu, InboundMessage, Outcome, Query, ReferenceClock};
use crate::domain::ports::MenuProvider;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct KomidaBot<M: MenuProvider> {
    engine: CommandEngine,
    menus: M,
}

impl<M: MenuProvider> KomidaBot<M> {
    pub fn new(engine: CommandEngine, menus: M) -> Self {
        Self { engine, menus }
    }

    pub fn menus(&self) -> &M {
        &self.menus
    }

    /// Produces the reply for `message`, or `None` when it is not for us.
    pub async fn handle(
        &self,
        message: &InboundMessage,
        clock: &ReferenceClock,
    ) -> Result<Option<String>> {
        if message.from_bot {
            tracing::debug!("Ignoring message from a bot");
            return Ok(None);
        }

        match self
            .engine
            .classify_and_resolve(&message.text, message.is_direct, clock)
        {
            Outcome::NoAction => Ok(None),
            Outcome::Failure(failure) => {
                tracing::warn!("Campus alias table is inconsistent: {}", failure);
                Ok(Some(formatter::format_failure(&failure)))
            }
            Outcome::Query(query) => {
                tracing::info!("Menu requested for {}", query);
                let reply = match self.find_menu(&query).await? {
                    Some(menu) => formatter::format_menu_reply(&query, &menu),
                    None => formatter::format_missing_menu(&query),
                };
                Ok(Some(reply))
            }
        }
    }

    /// Looks the menu up, refreshing the provider once on a miss.
    async fn find_menu(&self, query: &Query) -> Result<Option<DailyMenu>> {
        if let Some(menu) = self.menus.lookup_menu(query).await? {
            return Ok(Some(menu));
        }

        tracing::debug!("No menu found for {}, updating...", query);
        if let Err(e) = self.menus.refresh().await {
            tracing::error!("Problem while updating the menu: {}", e);
            return Ok(None);
        }

        self.menus.lookup_menu(query).await
    }
}

/// Reloads `menus` every `period` until the returned handle is aborted.
///
/// The first reload happens one full period after spawning.
pub fn spawn_menu_refresh<M>(menus: Arc<M>, period: Duration) -> JoinHandle<()>
where
    M: MenuProvider + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            match menus.refresh().await {
                Ok(count) => tracing::info!("🔄 Scheduled menu update: {} menus known", count),
                Err(e) => tracing::error!("Problem while updating the menu: {}", e),
            }
        }
    })
}
