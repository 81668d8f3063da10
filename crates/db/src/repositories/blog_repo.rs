//! Repository for the `blogs` table.

use bucketlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog::{Blog, CreateBlog, UpdateBlog};

const COLUMNS: &str = "id, title, slug, excerpt, content, cover_image_url, author_id, \
                       is_published, published_at, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a post. `published_at` is stamped when created as published.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        slug: &str,
        input: &CreateBlog,
    ) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs
                (title, slug, excerpt, content, cover_image_url, author_id,
                 is_published, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $7 THEN NOW() END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.cover_image_url)
            .bind(author_id)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published post by slug. Drafts are never returned.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE slug = $1 AND is_published = true");
        sqlx::query_as::<_, Blog>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List published posts, most recently published first.
    pub async fn list_published(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Blog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blogs
             WHERE is_published = true
             ORDER BY published_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List every post including drafts, for the CMS.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Blog>(&query).fetch_all(pool).await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// `published_at` is set the first time the post is published and kept
    /// across later unpublish/republish cycles.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlog,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                cover_image_url = COALESCE($6, cover_image_url),
                is_published = COALESCE($7, is_published),
                published_at = CASE
                    WHEN $7 = true AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.cover_image_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
