use tracing::info;

use crate::{error::StoreResult, models::NewMovie, store::RecordStore};

#[allow(clippy::too_many_arguments)]
fn movie(
    title: &str,
    year: i32,
    released: &str,
    runtime: &str,
    genre: &str,
    director: &str,
    actors: &str,
    poster: &str,
    imdb: f64,
) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year,
        released: released.to_string(),
        runtime: runtime.to_string(),
        genre: genre.to_string(),
        director: director.to_string(),
        actors: actors.to_string(),
        country: "USA".to_string(),
        poster: poster.to_string(),
        imdb,
        kind: "movie".to_string(),
    }
}

pub fn sample_movies() -> Vec<NewMovie> {
    vec![
        movie(
            "The Shawshank Redemption",
            1994,
            "1994-10-14",
            "142 min",
            "Drama",
            "Frank Darabont",
            "Tim Robbins, Morgan Freeman",
            "https://example.com/poster1.jpg",
            9.8,
        ),
        movie(
            "The Godfather",
            1972,
            "1972-03-24",
            "175 min",
            "Crime, Drama",
            "Francis Ford Coppola",
            "Marlon Brando, Al Pacino",
            "https://example.com/poster2.jpg",
            10.0,
        ),
        movie(
            "Pulp Fiction",
            1994,
            "1994-10-14",
            "154 min",
            "Crime, Drama",
            "Quentin Tarantino",
            "John Travolta, Uma Thurman",
            "https://example.com/poster3.jpg",
            5.5,
        ),
        movie(
            "The Dark Knight",
            2008,
            "2008-07-18",
            "152 min",
            "Action, Crime, Drama",
            "Christopher Nolan",
            "Christian Bale, Heath Ledger",
            "https://example.com/poster4.jpg",
            6.0,
        ),
        movie(
            "Forrest Gump",
            1994,
            "1994-07-06",
            "142 min",
            "Drama, Romance",
            "Robert Zemeckis",
            "Tom Hanks, Robin Wright",
            "https://example.com/poster5.jpg",
            8.8,
        ),
    ]
}

/// Inserts the sample movies one by one and returns their new ids.
/// Stops at the first storage failure; rows inserted before it stay.
pub async fn insert_sample_data(store: &dyn RecordStore) -> StoreResult<Vec<i32>> {
    let mut ids = Vec::new();
    for record in sample_movies() {
        ids.push(store.insert(&record).await?);
    }
    info!(count = ids.len(), "inserted sample movies");
    Ok(ids)
}
