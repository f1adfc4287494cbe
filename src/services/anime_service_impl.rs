//! `SeaORM` implementation of the `AnimeService` trait.

use crate::db::Store;
use crate::domain::AnimeId;
use crate::models::anime::Anime;
use crate::services::anime_service::{AnimeError, AnimeService};
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, warn};

pub struct SeaOrmAnimeService {
    store: Store,
}

impl SeaOrmAnimeService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl AnimeService for SeaOrmAnimeService {
    async fn find_all(&self) -> Result<Vec<Anime>, AnimeError> {
        Ok(self.store.list_all_anime().await?)
    }

    async fn find_by_id(&self, id: AnimeId) -> Result<Anime, AnimeError> {
        let anime = self
            .store
            .get_anime(id.value())
            .await?
            .ok_or(AnimeError::NotFound(id))?;

        debug!(anime_id = %id, "Found anime");
        Ok(anime)
    }

    async fn save(&self, anime: Anime) -> Result<Anime, AnimeError> {
        let to_insert = Anime {
            id: None,
            name: anime.name,
        };
        Ok(self.store.save_anime(&to_insert).await?)
    }

    async fn update(&self, id: AnimeId, anime: Anime) -> Result<(), AnimeError> {
        self.find_by_id(id).await?;

        self.store.save_anime(&anime.with_id(id.value())).await?;
        Ok(())
    }

    async fn delete(&self, id: AnimeId) -> Result<(), AnimeError> {
        self.find_by_id(id).await?;

        self.store.delete_anime(id.value()).await?;
        Ok(())
    }

    fn save_all(&self, items: Vec<Anime>) -> BoxStream<'static, Result<Anime, AnimeError>> {
        let saves = self.store.save_all_anime(items);

        // The store stream only writes when polled, so dropping it after the
        // first failure leaves the remaining items unsaved.
        stream::unfold(Some(saves), |state| async move {
            let mut saves = state?;
            let failure = match saves.next().await? {
                Ok(anime) if anime.has_valid_name() => return Some((Ok(anime), Some(saves))),
                Ok(anime) => {
                    warn!(anime_id = ?anime.id, "Batch save produced an anime with an empty name");
                    AnimeError::InvalidName
                }
                Err(e) => AnimeError::from(e),
            };
            Some((Err(failure), None))
        })
        .fuse()
        .boxed()
    }
}
