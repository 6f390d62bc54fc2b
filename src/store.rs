//! Database bootstrap: create the database if missing, then the tables and constraints.
//! Every statement is idempotent so startup can run it unconditionally.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Table DDL in foreign-key dependency order.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        is_admin BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cars (
        id SERIAL PRIMARY KEY,
        owner_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        make TEXT NOT NULL,
        model TEXT NOT NULL,
        model_year INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS drives (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT '',
        route_link TEXT NOT NULL UNIQUE,
        creator_id INTEGER REFERENCES users (id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users_drives (
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        drive_id INTEGER NOT NULL REFERENCES drives (id) ON DELETE CASCADE,
        PRIMARY KEY (user_id, drive_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS cars_owner_id_idx ON cars (owner_id)",
    "CREATE INDEX IF NOT EXISTS posts_user_id_idx ON posts (user_id)",
];

/// Create `users`, `cars`, `drives`, `posts` and `users_drives` if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(tables = 5, "schema ready");
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name.filter(|n| n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", crate::sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the database named
/// in `url` (if any). Host, port, socket, credentials and TLS settings carry over unchanged.
fn admin_options(url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        value: e.to_string(),
    })?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case("postgres://localhost/garage_drives", Some("garage_drives"))]
    #[case("postgres://u:p@db:5432/cars?sslmode=disable", Some("cars"))]
    #[case("postgres://localhost/", None)]
    #[case("postgres://localhost", None)]
    #[case("postgres://u:p@db.example:5432", None)]
    #[case("postgres:///garage?host=/var/run/postgresql", Some("garage"))]
    fn reads_target_database(#[case] url: &str, #[case] name: Option<&str>) {
        let (admin, db_name) = admin_options(url).unwrap();
        assert_eq!(db_name.as_deref(), name);
        assert_eq!(admin.get_database(), Some("postgres"));
    }

    #[test]
    fn keeps_server_address() {
        let (admin, _) = admin_options("postgres://u:p@db.example:5433/cars").unwrap();
        assert_eq!(admin.get_host(), "db.example");
        assert_eq!(admin.get_port(), 5433);
        assert_eq!(admin.get_username(), "u");
    }

    #[test]
    fn keeps_unix_socket() {
        let (admin, db_name) = admin_options("postgres:///garage?host=/var/run/postgresql").unwrap();
        assert_eq!(db_name.as_deref(), Some("garage"));
        assert_eq!(admin.get_socket().map(|p| p.as_path()), Some(Path::new("/var/run/postgresql")));
    }

    #[test]
    fn unparsable_url_is_config_error() {
        let err = admin_options("garbage").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. })));
    }
}
