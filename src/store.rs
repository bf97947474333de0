use std::num::NonZeroU64;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info, warn};

use crate::{
    entities::movie,
    error::{StoreError, StoreResult},
    models::{FieldValue, Movie, MovieField, MoviePatch, NewMovie, SortField},
};

/// Persistence operations for movies.
///
/// `update`, `patch` and `delete` first confirm the row exists and fail
/// with [`StoreError::NotFound`] otherwise.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Movie>>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Movie>>;
    async fn find_by_limit(&self, limit: NonZeroU64) -> StoreResult<Vec<Movie>>;
    /// Sorts ascending by `field`, which must name a known column.
    async fn find_by_limit_sorted(
        &self,
        limit: NonZeroU64,
        field: &str,
    ) -> StoreResult<Vec<Movie>>;
    async fn insert(&self, record: &NewMovie) -> StoreResult<i32>;
    async fn update(&self, id: i32, record: &NewMovie) -> StoreResult<bool>;
    async fn patch(&self, id: i32, patch: &MoviePatch) -> StoreResult<bool>;
    async fn delete(&self, id: i32) -> StoreResult<bool>;
}

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn require(&self, id: i32) -> StoreResult<()> {
        let existing = movie::Entity::find_by_id(id).one(&self.db).await?;
        if existing.is_none() {
            warn!(id = id, "movie not found");
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MovieStore {
    async fn find_all(&self) -> StoreResult<Vec<Movie>> {
        let rows = movie::Entity::find().all(&self.db).await?;
        debug!(count = rows.len(), "loaded all movies");
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Movie>> {
        let row = movie::Entity::find_by_id(id).one(&self.db).await?;
        debug!(id = id, found = row.is_some(), "looked up movie");
        Ok(row.map(Movie::from))
    }

    async fn find_by_limit(&self, limit: NonZeroU64) -> StoreResult<Vec<Movie>> {
        let rows = movie::Entity::find().limit(row_limit(limit)).all(&self.db).await?;
        debug!(limit = limit.get(), count = rows.len(), "loaded movie page");
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_limit_sorted(
        &self,
        limit: NonZeroU64,
        field: &str,
    ) -> StoreResult<Vec<Movie>> {
        let Some(sort) = SortField::parse(field) else {
            warn!(field = %field, "rejected sort field");
            return Err(StoreError::InvalidSortField(field.to_string()));
        };

        let rows = movie::Entity::find()
            .order_by_asc(sort.column())
            .limit(row_limit(limit))
            .all(&self.db)
            .await?;
        debug!(limit = limit.get(), field = %field, count = rows.len(), "loaded sorted movie page");
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn insert(&self, record: &NewMovie) -> StoreResult<i32> {
        let res = movie::Entity::insert(active_model(record)).exec(&self.db).await?;
        info!(id = res.last_insert_id, title = %record.title, "inserted movie");
        Ok(res.last_insert_id)
    }

    async fn update(&self, id: i32, record: &NewMovie) -> StoreResult<bool> {
        self.require(id).await?;

        let res = movie::Entity::update_many()
            .set(active_model(record))
            .filter(movie::Column::Uid.eq(id))
            .exec(&self.db)
            .await?;
        info!(id = id, rows = res.rows_affected, "updated movie");
        Ok(res.rows_affected > 0)
    }

    async fn patch(&self, id: i32, patch: &MoviePatch) -> StoreResult<bool> {
        self.require(id).await?;

        let mut model: movie::ActiveModel = Default::default();
        for (field, value) in patch.iter() {
            assign(&mut model, field, value)?;
        }

        let res = movie::Entity::update_many()
            .set(model)
            .filter(movie::Column::Uid.eq(id))
            .exec(&self.db)
            .await?;
        let fields: Vec<&str> = patch.fields().map(MovieField::as_str).collect();
        info!(id = id, fields = ?fields, rows = res.rows_affected, "patched movie");
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        self.require(id).await?;

        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        info!(id = id, rows = res.rows_affected, "deleted movie");
        Ok(res.rows_affected > 0)
    }
}

// LIMIT is bound as i64; anything larger already means "every row".
fn row_limit(limit: NonZeroU64) -> u64 {
    limit.get().min(i64::MAX as u64)
}

fn active_model(record: &NewMovie) -> movie::ActiveModel {
    movie::ActiveModel {
        uid: NotSet,
        title: Set(record.title.clone()),
        year: Set(record.year),
        released: Set(record.released.clone()),
        runtime: Set(record.runtime.clone()),
        genre: Set(record.genre.clone()),
        director: Set(record.director.clone()),
        actors: Set(record.actors.clone()),
        country: Set(record.country.clone()),
        poster: Set(record.poster.clone()),
        imdb: Set(record.imdb),
        kind: Set(record.kind.clone()),
    }
}

fn assign(
    model: &mut movie::ActiveModel,
    field: MovieField,
    value: &FieldValue,
) -> StoreResult<()> {
    match (field, value) {
        (MovieField::Year, FieldValue::Integer(v)) => model.year = Set(*v),
        (MovieField::Imdb, FieldValue::Real(v)) => model.imdb = Set(*v),
        (MovieField::Year | MovieField::Imdb, _)
        | (_, FieldValue::Integer(_) | FieldValue::Real(_)) => {
            return Err(DbErr::Type(format!("value {value:?} does not fit column {field}")).into());
        },
        (_, FieldValue::Text(v)) => model.set(field.column(), v.clone().into()),
    }
    Ok(())
}
