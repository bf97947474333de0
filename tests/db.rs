use std::time::Duration;

use movie_api::{
    db,
    store::{MovieStore, RecordStore},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

async fn pragma(db: &DatabaseConnection, name: &str) -> String {
    let row = db
        .query_one(Statement::from_string(db.get_database_backend(), format!("PRAGMA {name}")))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", name).unwrap()
}

#[tokio::test]
async fn file_database_runs_in_wal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("movies.db").display());

    let db = db::connect(&url, 2, Duration::from_secs(5)).await.unwrap();
    assert_eq!(pragma(&db, "journal_mode").await, "wal");
}

#[tokio::test]
async fn bootstrap_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("movies.db").display());

    let first = db::connect(&url, 1, Duration::from_secs(5)).await.unwrap();
    let store = MovieStore::new(first);
    movie_api::sample::insert_sample_data(&store).await.unwrap();
    drop(store);

    let second = db::connect(&url, 1, Duration::from_secs(5)).await.unwrap();
    assert_eq!(MovieStore::new(second).find_all().await.unwrap().len(), 5);
}
