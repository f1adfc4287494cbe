use anime_api::db::Store;
use anime_api::domain::AnimeId;
use anime_api::models::anime::Anime;
use anime_api::services::{AnimeError, AnimeService, SeaOrmAnimeService};
use futures::StreamExt;

async fn setup() -> (Store, SeaOrmAnimeService) {
    let store = Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store");
    (store.clone(), SeaOrmAnimeService::new(store))
}

#[tokio::test]
async fn test_save_then_find() {
    let (_, service) = setup().await;

    let saved = service.save(Anime::new("Fantastic Country")).await.unwrap();
    let id = AnimeId::new(saved.id.unwrap());

    let found = service.find_by_id(id).await.unwrap();
    assert_eq!(found, saved);
    assert_eq!(found.name, "Fantastic Country");
}

#[tokio::test]
async fn test_save_assigns_fresh_id() {
    let (_, service) = setup().await;

    let first = service.save(Anime::new("One")).await.unwrap();
    let second = service
        .save(Anime::new("Two").with_id(first.id.unwrap()))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(service.find_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_find_missing_is_not_found() {
    let (_, service) = setup().await;

    let err = service.find_by_id(AnimeId::new(999)).await.unwrap_err();
    assert!(matches!(err, AnimeError::NotFound(id) if id.value() == 999));
}

#[tokio::test]
async fn test_update_and_delete_missing_do_not_mutate() {
    let (store, service) = setup().await;
    service.save(Anime::new("Existing")).await.unwrap();

    let err = service
        .update(AnimeId::new(999), Anime::new("Ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, AnimeError::NotFound(_)));

    let err = service.delete(AnimeId::new(999)).await.unwrap_err();
    assert!(matches!(err, AnimeError::NotFound(_)));

    let all = store.list_all_anime().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Existing");
}

#[tokio::test]
async fn test_update_replaces_name() {
    let (_, service) = setup().await;
    let saved = service.save(Anime::new("Before")).await.unwrap();
    let id = AnimeId::new(saved.id.unwrap());

    service.update(id, Anime::new("After")).await.unwrap();

    assert_eq!(service.find_by_id(id).await.unwrap().name, "After");
}

#[tokio::test]
async fn test_delete_removes_record() {
    let (_, service) = setup().await;
    let saved = service.save(Anime::new("Gone")).await.unwrap();
    let id = AnimeId::new(saved.id.unwrap());

    service.delete(id).await.unwrap();

    assert!(matches!(
        service.find_by_id(id).await,
        Err(AnimeError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_save_all_emits_in_order() {
    let (_, service) = setup().await;

    let results: Vec<_> = service
        .save_all(vec![Anime::new("A"), Anime::new("B"), Anime::new("C")])
        .collect()
        .await;

    let names: Vec<String> = results
        .into_iter()
        .map(|r| r.unwrap().name)
        .collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[tokio::test]
async fn test_save_all_partial_then_fail() {
    let (store, service) = setup().await;

    let results: Vec<_> = service
        .save_all(vec![Anime::new("a"), Anime::new(""), Anime::new("c")])
        .collect()
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().name, "a");
    assert!(matches!(results[1], Err(AnimeError::InvalidName)));

    let stored: Vec<String> = store
        .list_all_anime()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(stored, ["a", ""]);
}

#[tokio::test]
async fn test_save_all_stops_without_further_writes() {
    let (store, service) = setup().await;

    let mut saves = service.save_all(vec![
        Anime::new(""),
        Anime::new("second"),
        Anime::new("third"),
    ]);

    assert!(matches!(saves.next().await, Some(Err(AnimeError::InvalidName))));
    assert!(saves.next().await.is_none());
    assert!(saves.next().await.is_none());

    let stored = store.list_all_anime().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "");
}

#[tokio::test]
async fn test_find_large_missing_id() {
    let (_, service) = setup().await;

    let err = service
        .find_by_id(AnimeId::new(3_000_000_000))
        .await
        .unwrap_err();
    assert!(matches!(err, AnimeError::NotFound(id) if id.value() == 3_000_000_000));
}

#[tokio::test]
async fn test_save_all_empty_batch() {
    let (_, service) = setup().await;

    let results: Vec<_> = service.save_all(Vec::new()).collect().await;
    assert!(results.is_empty());
}
