//! Postgres-backed testimonial service.
//!
//! ## Error Mapping
//!
//! | SQLx Error | ServiceError |
//! |------------|--------------|
//! | PoolTimedOut, PoolClosed, Io | `Unavailable` |
//! | anything else | `Storage` |
//!
//! The count query is bound as an `ILIKE` parameter; see [`CountQuery`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{
    PgPool, Row,
    postgres::{PgPoolOptions, PgRow},
};
use tracing::instrument;
use uuid::Uuid;

use testimonials_core::{NewTestimonial, Testimonial, TestimonialId};

use super::{CountQuery, ServiceError, TestimonialService};

#[derive(Debug, Clone)]
pub struct PostgresTestimonialService {
    pool: Arc<PgPool>,
}

impl PostgresTestimonialService {
    /// Create a new PostgresTestimonialService with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect a pool to `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, ServiceError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Create the `testimonials` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS testimonials (
                id UUID PRIMARY KEY,
                message TEXT NOT NULL,
                name TEXT NOT NULL,
                title TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }
}

fn map_sqlx_error(err: sqlx::Error) -> ServiceError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::warn!(error = %err, "testimonial store unavailable");
            ServiceError::Unavailable
        }
        other => ServiceError::Storage(other.to_string()),
    }
}

fn row_to_testimonial(row: &PgRow) -> Result<Testimonial, ServiceError> {
    let id: Uuid = row.try_get("id").map_err(map_sqlx_error)?;
    let message: String = row.try_get("message").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Testimonial::from_parts(
        TestimonialId::from_uuid(id),
        NewTestimonial { message, name, title },
        created_at,
    ))
}

#[async_trait::async_trait]
impl TestimonialService for PostgresTestimonialService {
    #[instrument(skip_all)]
    async fn create(&self, new: NewTestimonial) -> Result<Testimonial, ServiceError> {
        let testimonial = Testimonial::create(new, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO testimonials (id, message, name, title, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(testimonial.id_typed().as_uuid())
        .bind(testimonial.message())
        .bind(testimonial.name())
        .bind(testimonial.title())
        .bind(testimonial.created_at())
        .execute(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(testimonial)
    }

    #[instrument(skip_all)]
    async fn find_all(&self) -> Result<Vec<Testimonial>, ServiceError> {
        let rows = sqlx::query(
            r#"
            SELECT id, message, name, title, created_at
            FROM testimonials
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_testimonial).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &str) -> Result<String, ServiceError> {
        let pattern = CountQuery::parse(query)?.like_pattern();

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM testimonials
            WHERE $1::text IS NULL
                OR message ILIKE $1
                OR name ILIKE $1
                OR title ILIKE $1
            "#,
        )
        .bind(pattern)
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let total: i64 = row.try_get("total").map_err(map_sqlx_error)?;
        Ok(total.to_string())
    }
}
