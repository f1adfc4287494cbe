//! Domain service for anime CRUD operations.
//!
//! Handlers talk to this trait only; the business rules (not-found checks,
//! name inspection on batch saves) live behind it.

use crate::domain::AnimeId;
use crate::models::anime::Anime;
use futures::stream::BoxStream;
use thiserror::Error;

/// Domain errors for anime operations.
#[derive(Debug, Error)]
pub enum AnimeError {
    #[error("Anime not found: {0}")]
    NotFound(AnimeId),

    #[error("Invalid name")]
    InvalidName,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for AnimeError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AnimeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Domain service trait for anime operations.
///
/// # Examples
///
/// ```rust,ignore
/// use anime_api::services::{AnimeError, AnimeService};
/// use anime_api::domain::AnimeId;
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn AnimeService>) -> Result<(), AnimeError> {
///     let anime = service.find_by_id(AnimeId::new(1)).await?;
///     println!("{}", anime.name);
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait AnimeService: Send + Sync {
    /// Lists every stored anime in store order.
    ///
    /// # Errors
    ///
    /// Returns [`AnimeError::Database`] on connection failures.
    async fn find_all(&self) -> Result<Vec<Anime>, AnimeError>;

    /// Retrieves exactly one anime.
    ///
    /// # Errors
    ///
    /// - Returns [`AnimeError::NotFound`] if the anime does not exist
    /// - Returns [`AnimeError::Database`] on connection failures
    async fn find_by_id(&self, id: AnimeId) -> Result<Anime, AnimeError>;

    /// Persists a new anime and returns the stored record with its identity.
    /// Any id on the input is ignored.
    async fn save(&self, anime: Anime) -> Result<Anime, AnimeError>;

    /// Replaces the full record identified by `anime.id`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimeError::NotFound`] if the target does not exist; the
    /// store is left untouched in that case.
    async fn update(&self, id: AnimeId, anime: Anime) -> Result<(), AnimeError>;

    /// Removes an anime.
    ///
    /// # Errors
    ///
    /// Returns [`AnimeError::NotFound`] if the anime does not exist.
    async fn delete(&self, id: AnimeId) -> Result<(), AnimeError>;

    /// Saves every item in order and yields each stored record.
    ///
    /// The first stored record with an empty name ends the stream with
    /// [`AnimeError::InvalidName`]. Records yielded before it stay persisted;
    /// records after it are never written.
    fn save_all(&self, items: Vec<Anime>) -> BoxStream<'static, Result<Anime, AnimeError>>;
}
