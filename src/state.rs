use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AnimeService, SeaOrmAnimeService, SeaOrmUserService, UserService};

/// Services shared by the HTTP layer and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub anime_service: Arc<dyn AnimeService>,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;
        store.bootstrap_users(&config.security).await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services on top of an already migrated store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let anime_service =
            Arc::new(SeaOrmAnimeService::new(store.clone())) as Arc<dyn AnimeService>;
        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn UserService>;

        Self {
            config: Arc::new(config),
            store,
            anime_service,
            user_service,
        }
    }
}
