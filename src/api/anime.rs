use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use futures::TryStreamExt;
use std::sync::Arc;

use super::validation::{ValidatedJson, validate_anime_name};
use super::{AnimeBody, ApiError, AppState};
use crate::domain::AnimeId;
use crate::models::anime::Anime;

/// `GET /anime`
pub async fn list_anime(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Anime>>, ApiError> {
    let anime = state.anime_service().find_all().await?;
    Ok(Json(anime))
}

/// `GET /anime/{id}`
pub async fn get_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Anime>, ApiError> {
    let anime = state.anime_service().find_by_id(AnimeId::new(id)).await?;
    Ok(Json(anime))
}

/// `POST /anime`
pub async fn create_anime(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<AnimeBody>,
) -> Result<(StatusCode, Json<Anime>), ApiError> {
    let name = validate_anime_name(body.name)?;
    let saved = state.anime_service().save(Anime::new(name)).await?;

    tracing::info!(id = ?saved.id, name = %saved.name, "Anime created");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `POST /anime/batch`
///
/// Names are not checked up front. The stream is collected before the
/// response is built, so a failing item turns the whole response into an
/// error even though earlier items were stored.
pub async fn create_anime_batch(
    State(state): State<Arc<AppState>>,
    ValidatedJson(items): ValidatedJson<Vec<AnimeBody>>,
) -> Result<(StatusCode, Json<Vec<Anime>>), ApiError> {
    let items: Vec<Anime> = items
        .into_iter()
        .map(AnimeBody::into_anime_unchecked)
        .collect();
    let count = items.len();

    let saved: Vec<Anime> = state.anime_service().save_all(items).try_collect().await?;

    tracing::info!(requested = count, saved = saved.len(), "Anime batch saved");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `PUT /anime/{id}`
///
/// The path id wins over any id in the body.
pub async fn update_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<AnimeBody>,
) -> Result<StatusCode, ApiError> {
    let name = validate_anime_name(body.name)?;
    let id = AnimeId::new(id);

    state
        .anime_service()
        .update(id, Anime::new(name).with_id(id.value()))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /anime/{id}`
pub async fn delete_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.anime_service().delete(AnimeId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
