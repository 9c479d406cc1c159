// service/matching_service.rs
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, eventdb::EventExt, vendordb::VendorExt},
    models::vendormodels::{ApprovalStatus, Vendor, VendorPackage},
    service::error::ServiceError,
};

// Matches are capped to the strongest 20 vendors.
const MAX_MATCHES: usize = 20;

#[derive(Debug, Serialize, Clone)]
pub struct VendorMatch {
    pub vendor: Vendor,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "bestPackage")]
    pub best_package: Option<VendorPackage>,
}

#[derive(Debug, Clone)]
pub struct MatchingService {
    db_client: Arc<DBClient>,
}

impl MatchingService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Rank approved vendors against an event's budget. Every vendor is
    /// represented by its single best-scoring active package; vendors without
    /// active packages are skipped. Without a budget all approved vendors
    /// come back unscored.
    pub async fn featured_vendors_for_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<VendorMatch>, ServiceError> {
        let event = self
            .db_client
            .get_event(event_id)
            .await?
            .ok_or(ServiceError::EventNotFound(event_id))?;

        let approved_vendors = self
            .db_client
            .get_vendors_by_status(ApprovalStatus::Approved)
            .await?;

        let event_budget = match event.budget.filter(|budget| *budget > 0.0) {
            Some(budget) => budget,
            None => {
                return Ok(approved_vendors
                    .into_iter()
                    .map(|vendor| VendorMatch {
                        vendor,
                        match_score: 0.0,
                        best_package: None,
                    })
                    .collect());
            }
        };

        let mut matches = Vec::new();
        for vendor in approved_vendors {
            let packages = self
                .db_client
                .get_active_packages_by_vendor(vendor.id)
                .await?;

            if let Some((package, score)) = best_package_for_budget(&packages, event_budget) {
                matches.push(VendorMatch {
                    vendor,
                    match_score: score,
                    best_package: Some(package.clone()),
                });
            }
        }

        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(MAX_MATCHES);

        Ok(matches)
    }
}

fn best_package_for_budget(
    packages: &[VendorPackage],
    event_budget: f64,
) -> Option<(&VendorPackage, f64)> {
    packages
        .iter()
        .filter_map(|package| {
            package
                .price
                .map(|price| (package, budget_match_score(price, event_budget)))
        })
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Piecewise score of a package price against the event budget.
/// 100 at a near-exact fit, degrading as the price diverges in either
/// direction; over-budget packages degrade faster than under-budget ones.
pub fn budget_match_score(package_price: f64, event_budget: f64) -> f64 {
    if package_price <= 0.0 || event_budget <= 0.0 {
        return 0.0;
    }

    let ratio = package_price / event_budget;
    let percentage_diff = (ratio - 1.0).abs() * 100.0;

    if ratio <= 1.0 {
        if percentage_diff <= 5.0 {
            100.0
        } else if percentage_diff <= 20.0 {
            100.0 - (percentage_diff - 5.0)
        } else {
            // Far under budget reads as a quality mismatch
            (80.0 - (percentage_diff - 20.0) * 0.5).max(50.0)
        }
    } else if percentage_diff <= 20.0 {
        80.0 - percentage_diff
    } else {
        (60.0 - (percentage_diff - 20.0)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn package(price: Option<f64>) -> VendorPackage {
        let now = Utc::now();
        VendorPackage {
            id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            package_name: "Standard".to_string(),
            description: None,
            price,
            features: Vec::new(),
            duration: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn exact_budget_match_scores_100() {
        assert_eq!(budget_match_score(10_000.0, 10_000.0), 100.0);
        // Anything within 5% under still counts as a perfect fit
        assert_eq!(budget_match_score(9_600.0, 10_000.0), 100.0);
    }

    #[test]
    fn slightly_over_budget_example() {
        // budget 10000, price 10500: 5% over -> 80 - 5 = 75
        assert_eq!(budget_match_score(10_500.0, 10_000.0), 75.0);
    }

    #[test]
    fn under_budget_bands() {
        // 10% under: 100 - (10 - 5) = 95
        assert_eq!(budget_match_score(9_000.0, 10_000.0), 95.0);
        // 40% under: max(50, 80 - 10) = 70
        assert_eq!(budget_match_score(6_000.0, 10_000.0), 70.0);
        // 90% under floors at 50
        assert_eq!(budget_match_score(1_000.0, 10_000.0), 50.0);
    }

    #[test]
    fn over_budget_bands() {
        // 30% over: max(0, 60 - 10) = 50
        assert_eq!(budget_match_score(13_000.0, 10_000.0), 50.0);
        // 100% over floors at 0
        assert_eq!(budget_match_score(20_000.0, 10_000.0), 0.0);
    }

    #[test]
    fn non_positive_price_or_budget_scores_zero() {
        assert_eq!(budget_match_score(0.0, 10_000.0), 0.0);
        assert_eq!(budget_match_score(-5.0, 10_000.0), 0.0);
        assert_eq!(budget_match_score(5_000.0, 0.0), 0.0);
    }

    #[test]
    fn score_decreases_as_price_diverges() {
        let budget = 10_000.0;
        let under: Vec<f64> = [9_500.0, 9_000.0, 8_500.0, 8_000.0, 7_000.0]
            .iter()
            .map(|p| budget_match_score(*p, budget))
            .collect();
        let over: Vec<f64> = [10_500.0, 11_000.0, 11_500.0, 12_000.0, 13_000.0]
            .iter()
            .map(|p| budget_match_score(*p, budget))
            .collect();

        assert!(under.windows(2).all(|w| w[0] >= w[1]));
        assert!(over.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn best_package_picks_the_highest_score() {
        let packages = vec![
            package(Some(5_000.0)),
            package(Some(9_800.0)),
            package(Some(15_000.0)),
        ];

        let (best, score) = best_package_for_budget(&packages, 10_000.0).unwrap();
        assert_eq!(best.price, Some(9_800.0));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn packages_without_prices_are_ignored() {
        let packages = vec![package(None)];
        assert!(best_package_for_budget(&packages, 10_000.0).is_none());
    }
}
