// db/eventdb.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::eventmodel::Event;

const EVENT_COLUMNS: &str = "id, user_id, name, description, start_date, end_date, \
     location, budget, status, created_at, updated_at";

#[async_trait]
pub trait EventExt {
    async fn save_event(
        &self,
        user_id: Uuid,
        name: String,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        location: Option<String>,
        budget: Option<f64>,
    ) -> Result<Event, Error>;

    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>, Error>;

    async fn get_events(&self) -> Result<Vec<Event>, Error>;

    async fn get_events_by_user(&self, user_id: Uuid) -> Result<Vec<Event>, Error>;

    async fn get_upcoming_events_by_user(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        limit: i64,
    ) -> Result<Vec<Event>, Error>;

    async fn get_events_by_user_in_range(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Event>, Error>;

    async fn update_event_dates(
        &self,
        event_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Event, Error>;

    async fn delete_event(&self, event_id: Uuid) -> Result<u64, Error>;

    async fn count_events(&self) -> Result<i64, Error>;
}

#[async_trait]
impl EventExt for DBClient {
    async fn save_event(
        &self,
        user_id: Uuid,
        name: String,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        location: Option<String>,
        budget: Option<f64>,
    ) -> Result<Event, Error> {
        sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (user_id, name, description, start_date, end_date, location, budget)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(start_date)
        .bind(end_date)
        .bind(location)
        .bind(budget)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>, Error> {
        sqlx::query_as::<_, Event>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_events(&self) -> Result<Vec<Event>, Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_events_by_user(&self, user_id: Uuid) -> Result<Vec<Event>, Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE user_id = $1 ORDER BY start_date NULLS LAST"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_upcoming_events_by_user(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        limit: i64,
    ) -> Result<Vec<Event>, Error> {
        sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE user_id = $1 AND start_date >= $2
            ORDER BY start_date ASC
            LIMIT $3
            "#
        ))
        .bind(user_id)
        .bind(from)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_events_by_user_in_range(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Event>, Error> {
        sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE user_id = $1 AND start_date BETWEEN $2 AND $3
            ORDER BY start_date ASC
            "#
        ))
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_event_dates(
        &self,
        event_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Event, Error> {
        sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET start_date = $2, end_date = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_event(&self, event_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_events(&self) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
    }
}
