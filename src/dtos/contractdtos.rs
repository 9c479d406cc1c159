// dtos/contractdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractDto {
    pub user_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub contract_text: Option<String>,
    pub client_name: Option<String>,
    pub company_name: Option<String>,
    pub contact_email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub total_fee: Option<f64>,
    pub deposit_amount: Option<f64>,
    // ISO datetime, or a plain date that resolves to end of day
    pub payment_deadline: Option<String>,
    pub venue: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentDto {
    pub contract_id: Uuid,

    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,

    // CARD, BANK_TRANSFER or PAYPAL; anything else falls back to CARD
    pub payment_method: Option<String>,
}
