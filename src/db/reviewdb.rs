// db/reviewdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::reviewmodel::Review;

const REVIEW_COLUMNS: &str = "id, vendor_id, user_id, rating, comment, created_at, updated_at";

#[async_trait]
pub trait ReviewExt {
    async fn review_exists(&self, vendor_id: Uuid, user_id: Uuid) -> Result<bool, Error>;

    async fn save_review(
        &self,
        vendor_id: Uuid,
        user_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, Error>;

    async fn update_review(
        &self,
        review_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, Error>;

    async fn delete_review(&self, review_id: Uuid) -> Result<u64, Error>;

    async fn get_review(&self, review_id: Uuid) -> Result<Option<Review>, Error>;

    async fn get_reviews_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Review>, Error>;

    async fn get_reviews_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn review_exists(&self, vendor_id: Uuid, user_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM reviews WHERE vendor_id = $1 AND user_id = $2)",
        )
        .bind(vendor_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn save_review(
        &self,
        vendor_id: Uuid,
        user_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, Error> {
        sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (vendor_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(vendor_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_review(
        &self,
        review_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, Error> {
        sqlx::query_as::<_, Review>(&format!(
            r#"
            UPDATE reviews
            SET rating = $2, comment = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(review_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_review(&self, review_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_review(&self, review_id: Uuid) -> Result<Option<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_reviews_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE vendor_id = $1 ORDER BY created_at DESC"
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_reviews_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, Error> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
