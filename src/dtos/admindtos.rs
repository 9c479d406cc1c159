// dtos/admindtos.rs
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_events: i64,
    #[serde(rename = "bookings30d")]
    pub bookings_30d: i64,
    #[serde(rename = "revenue30d")]
    pub revenue_30d: f64,
    pub users_change: String,
    pub events_change: String,
    pub bookings_change: String,
    pub revenue_change: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BestVendor {
    pub id: Uuid,
    pub company_name: String,
    pub service_type: Option<String>,
    pub rating: f64,
    pub address: Option<String>,
    #[serde(rename = "mainPhotoURL")]
    pub main_photo_url: Option<String>,
    pub total_bookings: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize, Clone)]
pub struct MonthBreakdown {
    pub users: i64,
    pub bookings: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GrowthReport {
    pub total_users: i64,
    #[serde(rename = "usersLast30Days")]
    pub users_last_30_days: i64,
    #[serde(rename = "usersPrevious30Days")]
    pub users_previous_30_days: i64,
    pub user_growth_rate: f64,

    pub total_vendors: i64,
    #[serde(rename = "vendorsLast30Days")]
    pub vendors_last_30_days: i64,
    #[serde(rename = "vendorsPrevious30Days")]
    pub vendors_previous_30_days: i64,
    pub vendor_growth_rate: f64,

    pub total_events: i64,
    #[serde(rename = "eventsLast30Days")]
    pub events_last_30_days: i64,
    #[serde(rename = "eventsPrevious30Days")]
    pub events_previous_30_days: i64,
    pub event_growth_rate: f64,

    #[serde(rename = "bookingsLast30Days")]
    pub bookings_last_30_days: i64,
    #[serde(rename = "bookingsPrevious30Days")]
    pub bookings_previous_30_days: i64,
    pub booking_growth_rate: f64,

    #[serde(rename = "revenueLast30Days")]
    pub revenue_last_30_days: f64,
    #[serde(rename = "revenuePrevious30Days")]
    pub revenue_previous_30_days: f64,
    pub revenue_growth_rate: f64,

    pub monthly_breakdown: BTreeMap<String, MonthBreakdown>,
}
