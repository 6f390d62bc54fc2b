//! Message board posts.

use crate::error::AppError;
use crate::models::{DeletedPost, NewPost, Post, PostUpdate};
use crate::service::exec::fetch_optional_as;
use crate::sql::{sql_for_partial_update, BindValue};
use sqlx::PgPool;

const POST_COLUMNS: &str = "id, title, body, user_id, created_at";

pub struct PostRepo;

impl PostRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, body, user_id, created_at FROM posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>("SELECT id, title, body, user_id, created_at FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Post {} does not exist", id)))
    }

    pub async fn create(pool: &PgPool, author_id: i32, data: &NewPost) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, body, user_id) VALUES ($1, $2, $3) \
             RETURNING id, title, body, user_id, created_at",
        )
        .bind(&data.title)
        .bind(&data.body)
        .bind(author_id)
        .fetch_one(pool)
        .await?;
        tracing::info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    /// Change title and/or body; the author is never rewritten.
    pub async fn update(pool: &PgPool, id: i32, data: &PostUpdate) -> Result<Post, AppError> {
        let upd = sql_for_partial_update(&data.fields(), PostUpdate::COLUMNS)?;
        let sql = format!(
            "UPDATE posts SET {} WHERE id = ${} RETURNING {}",
            upd.set_cols,
            upd.next_placeholder(),
            POST_COLUMNS
        );
        let params = upd.into_params([BindValue::from(id)]);
        fetch_optional_as::<Post>(pool, &sql, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Post {} does not exist", id)))
    }

    /// Delete a post written by `author_id`.
    pub async fn remove(pool: &PgPool, id: i32, author_id: i32) -> Result<DeletedPost, AppError> {
        let deleted = sqlx::query_as::<_, DeletedPost>(
            "DELETE FROM posts WHERE id = $1 AND user_id = $2 RETURNING id, title",
        )
        .bind(id)
        .bind(author_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Unable to find post to remove"))?;
        tracing::info!(post_id = id, author_id, "post removed");
        Ok(deleted)
    }
}
