use crate::domain::model::{DailyMenu, Query};
use crate::domain::ports::MenuProvider;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Menus cached in memory, optionally backed by a JSON file.
///
/// The file holds an array of daily menus; `refresh` re-reads it. Menus are
/// keyed by their query so identical requests share one entry.
#[derive(Debug)]
pub struct JsonMenuStore {
    path: Option<PathBuf>,
    menus: RwLock<HashMap<Query, DailyMenu>>,
}

impl JsonMenuStore {
    /// A store backed by `path`; nothing is read until [`MenuProvider::refresh`].
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            menus: RwLock::new(HashMap::new()),
        }
    }

    /// Opens `path` and loads it straight away.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::new(path);
        store.refresh().await?;
        Ok(store)
    }

    pub fn in_memory<I: IntoIterator<Item = DailyMenu>>(menus: I) -> Self {
        Self {
            path: None,
            menus: RwLock::new(index(menus)),
        }
    }

    pub async fn len(&self) -> usize {
        self.menus.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.menus.read().await.is_empty()
    }
}

fn index<I: IntoIterator<Item = DailyMenu>>(menus: I) -> HashMap<Query, DailyMenu> {
    let mut indexed = HashMap::new();
    for menu in menus {
        if let Some(previous) = indexed.insert(menu.query(), menu) {
            tracing::warn!("Duplicate menu for {}, keeping the last one", previous.query());
        }
    }
    indexed
}

#[async_trait]
impl MenuProvider for JsonMenuStore {
    async fn lookup_menu(&self, query: &Query) -> Result<Option<DailyMenu>> {
        Ok(self.menus.read().await.get(query).cloned())
    }

    async fn refresh(&self) -> Result<usize> {
        let Some(path) = &self.path else {
            return Ok(self.len().await);
        };

        tracing::debug!("Loading menus from {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let menus: Vec<DailyMenu> = serde_json::from_str(&content)?;

        if let Some(empty) = menus.iter().find(|menu| menu.items.is_empty()) {
            return Err(BotError::MenuDataError {
                message: format!("menu for {} has no items", empty.query()),
            });
        }

        let indexed = index(menus);
        let count = indexed.len();
        *self.menus.write().await = indexed;
        tracing::info!("Loaded {} menus from {}", count, path.display());
        Ok(count)
    }
}
