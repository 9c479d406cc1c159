// service/review_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, reviewdb::ReviewExt, userdb::UserExt, vendordb::VendorExt},
    dtos::reviewdtos::ReviewDto,
    models::reviewmodel::Review,
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct ReviewService {
    db_client: Arc<DBClient>,
}

impl ReviewService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// One review per (vendor, user); every write recomputes the vendor's
    /// aggregate rating.
    pub async fn create_review(
        &self,
        user_id: Uuid,
        dto: &ReviewDto,
    ) -> Result<Review, ServiceError> {
        self.db_client
            .get_user(Some(user_id), None, None)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        self.db_client
            .get_vendor(dto.vendor_id)
            .await?
            .ok_or(ServiceError::VendorNotFound(dto.vendor_id))?;

        if self.db_client.review_exists(dto.vendor_id, user_id).await? {
            return Err(ServiceError::DuplicateReview);
        }

        let review = self
            .db_client
            .save_review(dto.vendor_id, user_id, dto.rating, dto.comment.clone())
            .await?;

        self.update_vendor_rating(dto.vendor_id).await?;

        Ok(review)
    }

    pub async fn update_review(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        dto: &ReviewDto,
    ) -> Result<Review, ServiceError> {
        let review = self
            .db_client
            .get_review(review_id)
            .await?
            .ok_or(ServiceError::ReviewNotFound(review_id))?;

        if review.user_id != user_id {
            return Err(ServiceError::Unauthorized);
        }

        let updated = self
            .db_client
            .update_review(review_id, dto.rating, dto.comment.clone())
            .await?;

        self.update_vendor_rating(review.vendor_id).await?;

        Ok(updated)
    }

    pub async fn delete_review(&self, review_id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
        let review = self
            .db_client
            .get_review(review_id)
            .await?
            .ok_or(ServiceError::ReviewNotFound(review_id))?;

        if review.user_id != user_id {
            return Err(ServiceError::Unauthorized);
        }

        self.db_client.delete_review(review_id).await?;
        self.update_vendor_rating(review.vendor_id).await?;

        Ok(())
    }

    pub async fn reviews_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Review>, ServiceError> {
        let reviews = self.db_client.get_reviews_by_vendor(vendor_id).await?;
        Ok(reviews)
    }

    pub async fn reviews_by_user(&self, user_id: Uuid) -> Result<Vec<Review>, ServiceError> {
        let reviews = self.db_client.get_reviews_by_user(user_id).await?;
        Ok(reviews)
    }

    pub async fn get_review(&self, review_id: Uuid) -> Result<Option<Review>, ServiceError> {
        let review = self.db_client.get_review(review_id).await?;
        Ok(review)
    }

    /// Vendor rating is the mean of its current reviews; with none left the
    /// stored value is untouched.
    async fn update_vendor_rating(&self, vendor_id: Uuid) -> Result<(), ServiceError> {
        let reviews = self.db_client.get_reviews_by_vendor(vendor_id).await?;
        if reviews.is_empty() {
            return Ok(());
        }

        let ratings: Vec<i32> = reviews.iter().map(|review| review.rating).collect();
        let average = average_rating(&ratings);

        self.db_client
            .get_vendor(vendor_id)
            .await?
            .ok_or(ServiceError::VendorNotFound(vendor_id))?;

        self.db_client
            .update_vendor_rating(vendor_id, average)
            .await?;

        Ok(())
    }
}

fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().map(|rating| *rating as f64).sum::<f64>() / ratings.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_the_arithmetic_mean() {
        assert_eq!(average_rating(&[5]), 5.0);
        assert_eq!(average_rating(&[4, 5]), 4.5);
        assert!((average_rating(&[1, 2, 5]) - 8.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_ratings_average_to_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }
}
