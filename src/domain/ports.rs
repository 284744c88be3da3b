use crate::domain::model::{DailyMenu, Query};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of daily menus. The resolver only ever hands it complete queries.
#[async_trait]
pub trait MenuProvider: Send + Sync {
    async fn lookup_menu(&self, query: &Query) -> Result<Option<DailyMenu>>;

    /// Reloads the backing data, returning how many menus are now known.
    async fn refresh(&self) -> Result<usize>;
}

#[async_trait]
impl<T: MenuProvider + ?Sized> MenuProvider for Arc<T> {
    async fn lookup_menu(&self, query: &Query) -> Result<Option<DailyMenu>> {
        (**self).lookup_menu(query).await
    }

    async fn refresh(&self) -> Result<usize> {
        (**self).refresh().await
    }
}
