//! Turns untrusted request bodies into validated movie values.
//!
//! Validation is fail-fast: the first missing or invalid field, in
//! [`MovieField::ALL`] order, is reported. Text fields are HTML-escaped;
//! `year` and `imdb` stay numeric.

use serde_json::{Map, Value};
use url::Url;

use crate::{
    error::ValidationError,
    models::{FieldValue, MovieField, MoviePatch, NewMovie},
};

/// Validates a create/replace body. Every field must be present.
pub fn validate_full(input: &Map<String, Value>) -> Result<NewMovie, ValidationError> {
    if let Some(missing) = MovieField::ALL.into_iter().find(|f| present(input, *f).is_none()) {
        return Err(ValidationError::MissingField(missing));
    }

    Ok(NewMovie {
        title: text(MovieField::Title, required(input, MovieField::Title)?)?,
        year: year(required(input, MovieField::Year)?)?,
        released: text(MovieField::Released, required(input, MovieField::Released)?)?,
        runtime: runtime(required(input, MovieField::Runtime)?)?,
        genre: text(MovieField::Genre, required(input, MovieField::Genre)?)?,
        director: text(MovieField::Director, required(input, MovieField::Director)?)?,
        actors: text(MovieField::Actors, required(input, MovieField::Actors)?)?,
        country: text(MovieField::Country, required(input, MovieField::Country)?)?,
        kind: text(MovieField::Kind, required(input, MovieField::Kind)?)?,
        poster: poster(required(input, MovieField::Poster)?)?,
        imdb: imdb(required(input, MovieField::Imdb)?)?,
    })
}

/// Validates a patch body. Only supplied fields are checked and returned;
/// unknown keys are ignored.
pub fn validate_partial(input: &Map<String, Value>) -> Result<MoviePatch, ValidationError> {
    let mut fields = Vec::new();
    for field in MovieField::ALL {
        if let Some(value) = present(input, field) {
            fields.push((field, validate_field(field, value)?));
        }
    }

    if fields.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }
    Ok(MoviePatch::new(fields))
}

fn validate_field(field: MovieField, value: &Value) -> Result<FieldValue, ValidationError> {
    match field {
        MovieField::Year => year(value).map(FieldValue::Integer),
        MovieField::Runtime => runtime(value).map(FieldValue::Text),
        MovieField::Poster => poster(value).map(FieldValue::Text),
        MovieField::Imdb => imdb(value).map(FieldValue::Real),
        _ => text(field, value).map(FieldValue::Text),
    }
}

// null counts as absent
fn present(input: &Map<String, Value>, field: MovieField) -> Option<&Value> {
    input.get(field.as_str()).filter(|v| !v.is_null())
}

fn required(input: &Map<String, Value>, field: MovieField) -> Result<&Value, ValidationError> {
    present(input, field).ok_or(ValidationError::MissingField(field))
}

fn invalid(field: MovieField, reason: &'static str) -> ValidationError {
    ValidationError::InvalidField { field, reason }
}

fn non_empty_str(field: MovieField, value: &Value) -> Result<&str, ValidationError> {
    match value {
        Value::String(s) if s.trim().is_empty() => Err(invalid(field, "must not be empty")),
        Value::String(s) => Ok(s),
        _ => Err(invalid(field, "must be text")),
    }
}

fn text(field: MovieField, value: &Value) -> Result<String, ValidationError> {
    non_empty_str(field, value).map(escape_html)
}

fn year(value: &Value) -> Result<i32, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or(invalid(MovieField::Year, "must be an integer"))
}

fn runtime(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(|minutes| format!("{minutes} min"))
            .ok_or(invalid(MovieField::Runtime, "must be a whole number of minutes")),
        other => text(MovieField::Runtime, other),
    }
}

fn poster(value: &Value) -> Result<String, ValidationError> {
    let raw = non_empty_str(MovieField::Poster, value)?;
    match Url::parse(raw.trim()) {
        Ok(url) if url.host().is_some() => Ok(escape_html(raw)),
        _ => Err(invalid(MovieField::Poster, "must be a valid URL")),
    }
}

fn imdb(value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|r| r.is_finite())
        .ok_or(invalid(MovieField::Imdb, "must be a number"))
}

/// Escapes the five HTML metacharacters.
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn inception() -> Map<String, Value> {
        body(json!({
            "title": "Inception",
            "year": 2010,
            "released": "2010-07-16",
            "runtime": "148 min",
            "genre": "Sci-Fi",
            "director": "Christopher Nolan",
            "actors": "Leonardo DiCaprio",
            "country": "USA",
            "poster": "https://example.com/p.jpg",
            "imdb": 8.8,
            "type": "movie"
        }))
    }

    #[test]
    fn full_accepts_complete_input() {
        let movie = validate_full(&inception()).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year, 2010);
        assert_eq!(movie.runtime, "148 min");
        assert_eq!(movie.poster, "https://example.com/p.jpg");
        assert_eq!(movie.imdb, 8.8);
        assert_eq!(movie.kind, "movie");
    }

    #[test]
    fn full_names_each_missing_field() {
        for field in MovieField::ALL {
            let mut input = inception();
            input.remove(field.as_str());
            assert_eq!(validate_full(&input), Err(ValidationError::MissingField(field)));
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let mut input = inception();
        input.insert("genre".into(), Value::Null);
        assert_eq!(validate_full(&input), Err(ValidationError::MissingField(MovieField::Genre)));
    }

    #[test]
    fn presence_is_checked_before_values() {
        let mut input = inception();
        input.insert("year".into(), json!("nineteen"));
        input.remove("imdb");
        assert_eq!(validate_full(&input), Err(ValidationError::MissingField(MovieField::Imdb)));
    }

    #[test]
    fn first_invalid_field_wins() {
        let mut input = inception();
        input.insert("year".into(), json!("soon"));
        input.insert("poster".into(), json!("not-a-url"));
        let err = validate_full(&input).unwrap_err();
        assert_eq!(err.field(), Some(MovieField::Year));
    }

    #[test]
    fn every_text_field_is_escaped() {
        let text_fields = MovieField::ALL
            .into_iter()
            .filter(|f| !matches!(f, MovieField::Year | MovieField::Imdb | MovieField::Poster));
        for field in text_fields {
            let mut input = inception();
            input.insert(field.as_str().into(), json!("<i>Fast & \"Furious\" 'Cut'</i>"));
            let movie = validate_full(&input).unwrap();
            assert_eq!(
                movie.text(field),
                Some("&lt;i&gt;Fast &amp; &quot;Furious&quot; &#039;Cut&#039;&lt;/i&gt;"),
                "{field}"
            );

            let mut partial = Map::new();
            partial.insert(field.as_str().into(), json!("a<b"));
            let patch = validate_partial(&partial).unwrap();
            assert_eq!(patch.get(field), Some(&FieldValue::Text("a&lt;b".into())), "{field}");
        }
    }

    #[test]
    fn poster_query_string_is_escaped() {
        let mut input = inception();
        input.insert("poster".into(), json!("https://x.com/p.jpg?a=1&b=2"));
        assert_eq!(validate_full(&input).unwrap().poster(), "https://x.com/p.jpg?a=1&amp;b=2");

        let patch =
            validate_partial(&body(json!({ "poster": "https://x.com/p.jpg?q='x'" }))).unwrap();
        assert_eq!(
            patch.get(MovieField::Poster),
            Some(&FieldValue::Text("https://x.com/p.jpg?q=&#039;x&#039;".into()))
        );
    }

    #[test]
    fn numeric_fields_are_not_escaped() {
        let movie = validate_full(&inception()).unwrap();
        assert_eq!(movie.text(MovieField::Year), None);
        assert_eq!(movie.year(), 2010);
        assert_eq!(movie.imdb(), 8.8);
    }

    #[test]
    fn empty_text_is_invalid() {
        let mut input = inception();
        input.insert("director".into(), json!("   "));
        assert_eq!(
            validate_full(&input),
            Err(ValidationError::InvalidField {
                field: MovieField::Director,
                reason: "must not be empty"
            })
        );
    }

    #[test]
    fn non_string_text_is_invalid() {
        let mut input = inception();
        input.insert("country".into(), json!(["USA"]));
        assert_eq!(validate_full(&input).unwrap_err().field(), Some(MovieField::Country));
    }

    #[test]
    fn malformed_poster_is_rejected() {
        for bad in ["not-a-url", "example.com/p.jpg", "http://", "mailto:someone"] {
            let mut input = inception();
            input.insert("poster".into(), json!(bad));
            assert_eq!(
                validate_full(&input),
                Err(ValidationError::InvalidField {
                    field: MovieField::Poster,
                    reason: "must be a valid URL"
                }),
                "{bad}"
            );
        }
    }

    #[test]
    fn year_accepts_numeric_strings_only() {
        let mut input = inception();
        input.insert("year".into(), json!(" 1999 "));
        assert_eq!(validate_full(&input).unwrap().year, 1999);

        input.insert("year".into(), json!(1999.5));
        assert_eq!(validate_full(&input).unwrap_err().field(), Some(MovieField::Year));

        input.insert("year".into(), json!(true));
        assert_eq!(validate_full(&input).unwrap_err().field(), Some(MovieField::Year));
    }

    #[test]
    fn runtime_minutes_get_a_unit() {
        let mut input = inception();
        input.insert("runtime".into(), json!(148));
        assert_eq!(validate_full(&input).unwrap().runtime, "148 min");

        input.insert("runtime".into(), json!(-5));
        assert_eq!(validate_full(&input).unwrap_err().field(), Some(MovieField::Runtime));
    }

    #[test]
    fn imdb_must_be_numeric() {
        let mut input = inception();
        input.insert("imdb".into(), json!("7.5"));
        assert_eq!(validate_full(&input).unwrap().imdb, 7.5);

        input.insert("imdb".into(), json!(9));
        assert_eq!(validate_full(&input).unwrap().imdb, 9.0);

        input.insert("imdb".into(), json!("great"));
        assert_eq!(
            validate_full(&input),
            Err(ValidationError::InvalidField { field: MovieField::Imdb, reason: "must be a number" })
        );
    }

    #[test]
    fn partial_returns_only_supplied_fields() {
        let patch = validate_partial(&body(json!({ "title": "X" }))).unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get(MovieField::Title), Some(&FieldValue::Text("X".into())));
    }

    #[test]
    fn partial_keeps_validation_order_and_ignores_unknown_keys() {
        let patch = validate_partial(&body(json!({
            "imdb": 9.0,
            "uid": 42,
            "title = 'x'; --": "y",
            "year": "2001",
        })))
        .unwrap();
        assert_eq!(patch.fields().collect::<Vec<_>>(), vec![MovieField::Year, MovieField::Imdb]);
        assert_eq!(patch.get(MovieField::Year), Some(&FieldValue::Integer(2001)));
    }

    #[test]
    fn partial_still_validates_each_field() {
        let err = validate_partial(&body(json!({ "poster": "nope" }))).unwrap_err();
        assert_eq!(err.field(), Some(MovieField::Poster));
    }

    #[test]
    fn partial_requires_at_least_one_field() {
        assert_eq!(validate_partial(&Map::new()), Err(ValidationError::EmptyPatch));
        assert_eq!(
            validate_partial(&body(json!({ "title": null, "rating": 3 }))),
            Err(ValidationError::EmptyPatch)
        );
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let mut input = inception();
        input.remove("type");
        assert_eq!(
            validate_full(&input).unwrap_err().to_string(),
            "Field 'type' is missing in the request body."
        );
    }
}
