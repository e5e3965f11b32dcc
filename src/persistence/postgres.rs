//! PostgreSQL implementation of [`EventRepository`].

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::EventRepository;
use super::models::{EVENT_COLUMNS, EventRow, event_from_row};
use crate::config::AppConfig;
use crate::domain::{Event, EventId, NewEvent, Page, PageRequest};
use crate::error::ApiError;

/// PostgreSQL-backed event storage using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Creates a repository over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the database is unreachable.
    pub async fn connect(config: &AppConfig) -> Result<Self, ApiError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), ApiError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn insert(&self, event: NewEvent) -> Result<Event, ApiError> {
        let NewEvent {
            submission: s,
            free,
            offline,
            event_status,
        } = event;

        let sql = format!(
            "INSERT INTO events (name, description, begin_enrollment_date_time, \
             close_enrollment_date_time, begin_event_date_time, end_event_date_time, location, \
             base_price, max_price, limit_of_enrollment, free, offline, event_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {EVENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(s.name)
            .bind(s.description)
            .bind(s.begin_enrollment_date_time)
            .bind(s.close_enrollment_date_time)
            .bind(s.begin_event_date_time)
            .bind(s.end_event_date_time)
            .bind(s.location)
            .bind(s.base_price)
            .bind(s.max_price)
            .bind(s.limit_of_enrollment)
            .bind(free)
            .bind(offline)
            .bind(event_status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        event_from_row(row)
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, ApiError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        row.map(event_from_row).transpose()
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Event>, ApiError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        // The ORDER BY clause comes from a closed enum, never from caller text.
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY {}, id ASC LIMIT $1 OFFSET $2",
            request.sort
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(i64::from(request.size))
            .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApiError::Persistence(e.to_string()))?;

        let content = rows
            .into_iter()
            .map(event_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            content,
            request: *request,
            total_elements: u64::try_from(total).unwrap_or(0),
        })
    }
}
