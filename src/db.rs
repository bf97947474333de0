use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

const SCHEMA: &str = include_str!("../sql/001_movies.sql");

/// Opens the connection pool and makes sure the `movies` table exists.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(database_url.to_string());
    opts.max_connections(max_connections.max(1))
        .min_connections(1)
        .acquire_timeout(acquire_timeout);

    let db = Database::connect(opts).await?;

    // journal_mode is stored in the database file and holds for every pooled
    // connection; synchronous only reaches the connection that runs it.
    for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    run_sql(&db, SCHEMA).await?;
    Ok(db)
}

async fn run_sql(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    for stmt in sql.split(';') {
        let stmt = stmt.trim();
        if stmt.is_empty() {
            continue;
        }
        db.execute(Statement::from_string(db.get_database_backend(), stmt.to_string())).await?;
    }
    Ok(())
}
