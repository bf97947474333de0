use std::fmt;

use serde::Serialize;

use crate::entities::movie;

/// Value columns of the `movies` table.
///
/// This is the only source of column names that ever reaches SQL text:
/// sort targets and patch assignments are resolved to a `MovieField`
/// before a statement is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MovieField {
    Title,
    Year,
    Released,
    Runtime,
    Genre,
    Director,
    Actors,
    Country,
    Kind,
    Poster,
    Imdb,
}

impl MovieField {
    /// Every field, in the order the validator checks them.
    pub const ALL: [MovieField; 11] = [
        MovieField::Title,
        MovieField::Year,
        MovieField::Released,
        MovieField::Runtime,
        MovieField::Genre,
        MovieField::Director,
        MovieField::Actors,
        MovieField::Country,
        MovieField::Kind,
        MovieField::Poster,
        MovieField::Imdb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MovieField::Title => "title",
            MovieField::Year => "year",
            MovieField::Released => "released",
            MovieField::Runtime => "runtime",
            MovieField::Genre => "genre",
            MovieField::Director => "director",
            MovieField::Actors => "actors",
            MovieField::Country => "country",
            MovieField::Kind => "type",
            MovieField::Poster => "poster",
            MovieField::Imdb => "imdb",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    pub fn column(self) -> movie::Column {
        match self {
            MovieField::Title => movie::Column::Title,
            MovieField::Year => movie::Column::Year,
            MovieField::Released => movie::Column::Released,
            MovieField::Runtime => movie::Column::Runtime,
            MovieField::Genre => movie::Column::Genre,
            MovieField::Director => movie::Column::Director,
            MovieField::Actors => movie::Column::Actors,
            MovieField::Country => movie::Column::Country,
            MovieField::Kind => movie::Column::Kind,
            MovieField::Poster => movie::Column::Poster,
            MovieField::Imdb => movie::Column::Imdb,
        }
    }
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allowed `ORDER BY` targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    Uid,
    Field(MovieField),
}

impl SortField {
    pub fn parse(name: &str) -> Option<Self> {
        if name == "uid" {
            return Some(SortField::Uid);
        }
        MovieField::parse(name).map(SortField::Field)
    }

    pub fn column(self) -> movie::Column {
        match self {
            SortField::Uid => movie::Column::Uid,
            SortField::Field(field) => field.column(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
    Real(f64),
}

/// A complete, validated movie ready for insert or full replace.
///
/// Only the validator (and the built-in sample data) can build one, and
/// the fields are read-only outside this crate, so every instance carries
/// all eleven sanitized values.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub(crate) title: String,
    pub(crate) year: i32,
    pub(crate) released: String,
    pub(crate) runtime: String,
    pub(crate) genre: String,
    pub(crate) director: String,
    pub(crate) actors: String,
    pub(crate) country: String,
    pub(crate) poster: String,
    pub(crate) imdb: f64,
    pub(crate) kind: String,
}

impl NewMovie {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn released(&self) -> &str {
        &self.released
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn director(&self) -> &str {
        &self.director
    }

    pub fn actors(&self) -> &str {
        &self.actors
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn poster(&self) -> &str {
        &self.poster
    }

    pub fn imdb(&self) -> f64 {
        self.imdb
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Text value of `field`; `None` for the numeric `year` and `imdb`.
    pub fn text(&self, field: MovieField) -> Option<&str> {
        match field {
            MovieField::Title => Some(&self.title),
            MovieField::Released => Some(&self.released),
            MovieField::Runtime => Some(&self.runtime),
            MovieField::Genre => Some(&self.genre),
            MovieField::Director => Some(&self.director),
            MovieField::Actors => Some(&self.actors),
            MovieField::Country => Some(&self.country),
            MovieField::Kind => Some(&self.kind),
            MovieField::Poster => Some(&self.poster),
            MovieField::Year | MovieField::Imdb => None,
        }
    }
}

/// A validated, non-empty set of column assignments for a partial update.
#[derive(Clone, Debug, PartialEq)]
pub struct MoviePatch {
    fields: Vec<(MovieField, FieldValue)>,
}

impl MoviePatch {
    pub(crate) fn new(fields: Vec<(MovieField, FieldValue)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: MovieField) -> Option<&FieldValue> {
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = MovieField> + '_ {
        self.fields.iter().map(|(f, _)| *f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MovieField, &FieldValue)> {
        self.fields.iter().map(|(f, v)| (*f, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub actors: String,
    pub country: String,
    pub poster: String,
    pub imdb: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<movie::Model> for Movie {
    fn from(row: movie::Model) -> Self {
        Self {
            id: row.uid,
            title: row.title,
            year: row.year,
            released: row.released,
            runtime: row.runtime,
            genre: row.genre,
            director: row.director,
            actors: row.actors,
            country: row.country,
            poster: row.poster,
            imdb: row.imdb,
            kind: row.kind,
        }
    }
}

/// JSON body for status replies: `{code, message}` plus the new id on insert.
#[derive(Clone, Debug, Serialize)]
pub struct ApiMessage {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl ApiMessage {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), id: None }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}
