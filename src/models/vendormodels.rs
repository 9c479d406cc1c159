// models/vendormodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "approval_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Vendor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub service_type: Option<String>,
    pub address: Option<String>,
    pub main_photo_url: Option<String>,
    pub detail_photo_url: Option<String>,
    pub details: Option<String>,
    // Derived: arithmetic mean of the vendor's current reviews
    pub rating: f64,
    pub approval_status: ApprovalStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct VendorPackage {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub package_name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub is_active: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct EventVendor {
    pub id: Uuid,
    pub event_id: Uuid,
    pub vendor_id: Uuid,
    pub assigned_service: Option<String>,
    pub status: AssignmentStatus,
}
