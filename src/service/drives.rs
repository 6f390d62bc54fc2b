//! Group drives and participation.

use crate::error::AppError;
use crate::models::{Drive, DriveSearch, DriveUpdate, NewDrive};
use crate::service::exec::{fetch_all_as, fetch_optional_as};
use crate::service::users::UserRepo;
use crate::sql::{sql_for_partial_update, BindValue};
use sqlx::PgPool;

const DRIVE_COLUMNS: &str = "id, title, description, route_link, creator_id, created_at";

pub struct DriveRepo;

impl DriveRepo {
    /// Insert a drive. Title and route link uniqueness is decided by the insert itself, so two
    /// concurrent creates with the same link cannot both succeed.
    pub async fn create(pool: &PgPool, data: &NewDrive, creator_id: Option<i32>) -> Result<Drive, AppError> {
        let inserted = sqlx::query_as::<_, Drive>(
            "INSERT INTO drives (title, description, route_link, creator_id) VALUES ($1, $2, $3, $4) \
             ON CONFLICT DO NOTHING \
             RETURNING id, title, description, route_link, creator_id, created_at",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.route_link)
        .bind(creator_id)
        .fetch_optional(pool)
        .await?;
        match inserted {
            Some(drive) => {
                tracing::info!(drive_id = drive.id, title = %drive.title, "drive created");
                Ok(drive)
            }
            None => Err(Self::conflict_reason(pool, data).await?),
        }
    }

    /// Which unique column the rejected insert collided with. The lookup runs after the insert,
    /// so a conflicting row deleted in between leaves neither flag set.
    async fn conflict_reason(pool: &PgPool, data: &NewDrive) -> Result<AppError, AppError> {
        let (link_taken, title_taken): (bool, bool) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drives WHERE route_link = $1), \
                    EXISTS(SELECT 1 FROM drives WHERE title = $2)",
        )
        .bind(&data.route_link)
        .bind(&data.title)
        .fetch_one(pool)
        .await?;
        Ok(conflict_error(link_taken, title_taken, &data.title))
    }

    /// Drives matching the optional filters, newest first.
    pub async fn list(pool: &PgPool, search: &DriveSearch) -> Result<Vec<Drive>, AppError> {
        let (sql, params) = search_query(search);
        fetch_all_as::<Drive>(pool, &sql, params).await
    }

    pub async fn get(pool: &PgPool, title: &str) -> Result<Drive, AppError> {
        sqlx::query_as::<_, Drive>(
            "SELECT id, title, description, route_link, creator_id, created_at FROM drives WHERE title = $1",
        )
        .bind(title)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No Drive exists with name: {}", title)))
    }

    pub async fn update(pool: &PgPool, title: &str, data: &DriveUpdate) -> Result<Drive, AppError> {
        let upd = sql_for_partial_update(&data.fields(), DriveUpdate::COLUMNS)?;
        let sql = format!(
            "UPDATE drives SET {} WHERE title = ${} RETURNING {}",
            upd.set_cols,
            upd.next_placeholder(),
            DRIVE_COLUMNS
        );
        let params = upd.into_params([BindValue::from(title)]);
        fetch_optional_as::<Drive>(pool, &sql, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Drive with title {} does not exist", title)))
    }

    /// Delete by title; returns the deleted title.
    pub async fn remove(pool: &PgPool, title: &str) -> Result<String, AppError> {
        let row: Option<(String,)> = sqlx::query_as("DELETE FROM drives WHERE title = $1 RETURNING title")
            .bind(title)
            .fetch_optional(pool)
            .await?;
        let (deleted,) = row.ok_or_else(|| AppError::not_found(format!("Drive with title {} does not exist.", title)))?;
        tracing::info!(title = %deleted, "drive removed");
        Ok(deleted)
    }

    async fn id_by_title(pool: &PgPool, title: &str) -> Result<i32, AppError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT id FROM drives WHERE title = $1")
            .bind(title)
            .fetch_optional(pool)
            .await?;
        row.map(|(id,)| id)
            .ok_or_else(|| AppError::not_found("Drive does not exist"))
    }

    /// Add `username` to the drive's participants. Joining twice is a no-op.
    pub async fn join_drive(pool: &PgPool, username: &str, title: &str) -> Result<(), AppError> {
        let drive_id = Self::id_by_title(pool, title).await?;
        let user_id = UserRepo::id_by_username(pool, username).await?;
        sqlx::query("INSERT INTO users_drives (user_id, drive_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(user_id)
            .bind(drive_id)
            .execute(pool)
            .await?;
        tracing::info!(user_id, drive_id, "joined drive");
        Ok(())
    }

    pub async fn leave_drive(pool: &PgPool, username: &str, title: &str) -> Result<(), AppError> {
        let drive_id = Self::id_by_title(pool, title).await?;
        let user_id = UserRepo::id_by_username(pool, username).await?;
        let res = sqlx::query("DELETE FROM users_drives WHERE user_id = $1 AND drive_id = $2")
            .bind(user_id)
            .bind(drive_id)
            .execute(pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(AppError::not_found(format!("{} is not a participant of {}", username, title)));
        }
        tracing::info!(user_id, drive_id, "left drive");
        Ok(())
    }

    /// Usernames of everyone who joined the drive.
    pub async fn participants(pool: &PgPool, title: &str) -> Result<Vec<String>, AppError> {
        let drive_id = Self::id_by_title(pool, title).await?;
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT u.username FROM users_drives ud JOIN users u ON u.id = ud.user_id \
             WHERE ud.drive_id = $1 ORDER BY u.username",
        )
        .bind(drive_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

fn conflict_error(link_taken: bool, title_taken: bool, title: &str) -> AppError {
    if link_taken {
        AppError::bad_request("This route link already exists")
    } else if title_taken {
        AppError::bad_request(format!("A drive titled '{}' already exists", title))
    } else {
        AppError::bad_request("A drive with this title or route link already exists")
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// SELECT for the drive listing with the active filters, params bound in filter order.
fn search_query(search: &DriveSearch) -> (String, Vec<BindValue>) {
    let mut params = Vec::new();
    let mut where_parts = Vec::new();
    if let Some(title) = &search.title {
        params.push(BindValue::from(format!("%{}%", escape_like(title))));
        where_parts.push(format!("title ILIKE ${}", params.len()));
    }
    if let Some(day) = search.created_at {
        params.push(BindValue::from(day.format("%Y-%m-%d").to_string()));
        where_parts.push(format!("(created_at AT TIME ZONE 'UTC')::date = ${}::date", params.len()));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let sql = format!(
        "SELECT {} FROM drives{} ORDER BY created_at DESC, id DESC",
        DRIVE_COLUMNS, where_clause
    );
    (sql, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(true, true, "This route link already exists")]
    #[case(true, false, "This route link already exists")]
    #[case(false, true, "A drive titled 'Sunday run' already exists")]
    #[case(false, false, "A drive with this title or route link already exists")]
    fn conflict_message_names_the_clashing_column(
        #[case] link_taken: bool,
        #[case] title_taken: bool,
        #[case] expected: &str,
    ) {
        let err = conflict_error(link_taken, title_taken, "Sunday run");
        assert!(matches!(err, AppError::BadRequest(ref m) if m == expected), "{:?}", err);
    }

    #[test]
    fn unfiltered_listing_has_no_where() {
        let (sql, params) = search_query(&DriveSearch::default());
        assert_eq!(
            sql,
            "SELECT id, title, description, route_link, creator_id, created_at FROM drives ORDER BY created_at DESC, id DESC"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn both_filters_are_numbered_in_order() {
        let search = DriveSearch {
            title: Some("Canyon".into()),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 9),
        };
        let (sql, params) = search_query(&search);
        assert!(sql.contains(" WHERE title ILIKE $1 AND (created_at AT TIME ZONE 'UTC')::date = $2::date "));
        assert_eq!(params, vec![BindValue::from("%Canyon%"), BindValue::from("2024-03-09")]);
    }

    #[test]
    fn title_wildcards_match_literally() {
        assert_eq!(escape_like(r"100%_fun\"), r"100\%\_fun\\");
    }
}
