// dtos/vendordtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct VendorRegDto {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,

    pub service_type: Option<String>,
    pub address: Option<String>,
    pub main_photo_url: Option<String>,
    pub detail_photo_url: Option<String>,
    pub details: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct VendorUpdateDto {
    pub company_name: Option<String>,
    pub service_type: Option<String>,
    pub address: Option<String>,
    pub main_photo_url: Option<String>,
    pub detail_photo_url: Option<String>,
    pub details: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct VendorPackageDto {
    #[validate(length(min = 1, message = "Package name is required"))]
    pub package_name: String,

    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,

    #[serde(default)]
    pub features: Vec<String>,

    pub duration: Option<String>,
    pub is_active: Option<bool>,
}
