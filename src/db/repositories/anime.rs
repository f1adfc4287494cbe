use crate::entities::anime;
use crate::models::anime::Anime;
use anyhow::{Context, Result};
use futures::stream::{self, BoxStream, StreamExt};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, sea_query::OnConflict,
};
use tracing::{debug, info};

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Anime>> {
        let rows = anime::Entity::find()
            .order_by_asc(anime::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list anime")?;

        Ok(rows.into_iter().map(Anime::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Anime>> {
        let row = anime::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to query anime {id}"))?;

        Ok(row.map(Anime::from))
    }

    /// Inserts when `anime.id` is `None`, otherwise upserts the full row.
    pub async fn save(&self, anime: &Anime) -> Result<Anime> {
        match anime.id {
            None => {
                let model = anime::ActiveModel {
                    name: Set(anime.name.clone()),
                    ..Default::default()
                }
                .insert(&self.conn)
                .await
                .context("Failed to insert anime")?;

                debug!("Inserted anime {}: {}", model.id, model.name);
                Ok(Anime::from(model))
            }
            Some(id) => {
                let active_model = anime::ActiveModel {
                    id: Set(id),
                    name: Set(anime.name.clone()),
                };

                anime::Entity::insert(active_model)
                    .on_conflict(
                        OnConflict::column(anime::Column::Id)
                            .update_column(anime::Column::Name)
                            .to_owned(),
                    )
                    .exec(&self.conn)
                    .await
                    .with_context(|| format!("Failed to save anime {id}"))?;

                debug!("Saved anime {}: {}", id, anime.name);
                Ok(Anime {
                    id: Some(id),
                    name: anime.name.clone(),
                })
            }
        }
    }

    /// Saves each item in order, one at a time, yielding the stored record.
    ///
    /// Nothing is written until the stream is polled, and items behind an
    /// abandoned stream are never written.
    pub fn save_all(&self, items: Vec<Anime>) -> BoxStream<'static, Result<Anime>> {
        let conn = self.conn.clone();
        stream::iter(items)
            .then(move |item| {
                let repo = Self::new(conn.clone());
                async move { repo.save(&item).await }
            })
            .boxed()
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = anime::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .with_context(|| format!("Failed to delete anime {id}"))?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed anime with ID: {}", id);
        }
        Ok(removed)
    }
}
