// db/contractdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::contractmodels::{Contract, Payment, PaymentMethod, PaymentStatus};

const CONTRACT_COLUMNS: &str = "id, user_id, event_id, vendor_id, contract_text, client_name, \
     company_name, contact_email, phone_number, address, total_fee, deposit_amount, \
     payment_deadline, venue, signed, signed_at, created_at, updated_at";

const PAYMENT_COLUMNS: &str =
    "id, contract_id, amount, payment_method, payment_status, payment_date";

#[derive(Debug, Default, Clone)]
pub struct NewContract {
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
    pub payment_deadline: Option<DateTime<Utc>>,
    pub venue: Option<String>,
}

#[async_trait]
pub trait ContractExt {
    async fn save_contract(&self, contract: NewContract) -> Result<Contract, Error>;

    async fn get_contract(&self, contract_id: Uuid) -> Result<Option<Contract>, Error>;

    async fn get_contracts(&self) -> Result<Vec<Contract>, Error>;

    async fn get_contracts_by_event(&self, event_id: Uuid) -> Result<Vec<Contract>, Error>;

    async fn get_contracts_by_user(&self, user_id: Uuid) -> Result<Vec<Contract>, Error>;

    async fn save_payment(
        &self,
        contract_id: Uuid,
        amount: f64,
        payment_method: PaymentMethod,
        payment_status: PaymentStatus,
    ) -> Result<Payment, Error>;

    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>, Error>;

    async fn get_payments_by_contract(&self, contract_id: Uuid) -> Result<Vec<Payment>, Error>;

    async fn get_payments(&self) -> Result<Vec<Payment>, Error>;
}

#[async_trait]
impl ContractExt for DBClient {
    async fn save_contract(&self, contract: NewContract) -> Result<Contract, Error> {
        sqlx::query_as::<_, Contract>(&format!(
            r#"
            INSERT INTO contracts
                (user_id, event_id, vendor_id, contract_text, client_name, company_name,
                 contact_email, phone_number, address, total_fee, deposit_amount,
                 payment_deadline, venue)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(contract.user_id)
        .bind(contract.event_id)
        .bind(contract.vendor_id)
        .bind(contract.contract_text)
        .bind(contract.client_name)
        .bind(contract.company_name)
        .bind(contract.contact_email)
        .bind(contract.phone_number)
        .bind(contract.address)
        .bind(contract.total_fee)
        .bind(contract.deposit_amount)
        .bind(contract.payment_deadline)
        .bind(contract.venue)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_contract(&self, contract_id: Uuid) -> Result<Option<Contract>, Error> {
        sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1"
        ))
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_contracts(&self) -> Result<Vec<Contract>, Error> {
        sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_contracts_by_event(&self, event_id: Uuid) -> Result<Vec<Contract>, Error> {
        sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE event_id = $1 ORDER BY created_at DESC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_contracts_by_user(&self, user_id: Uuid) -> Result<Vec<Contract>, Error> {
        sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_payment(
        &self,
        contract_id: Uuid,
        amount: f64,
        payment_method: PaymentMethod,
        payment_status: PaymentStatus,
    ) -> Result<Payment, Error> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (contract_id, amount, payment_method, payment_status)
            VALUES ($1, $2, $3, $4)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(contract_id)
        .bind(amount)
        .bind(payment_method)
        .bind(payment_status)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>, Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_payments_by_contract(&self, contract_id: Uuid) -> Result<Vec<Payment>, Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE contract_id = $1 ORDER BY payment_date DESC"
        ))
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_payments(&self) -> Result<Vec<Payment>, Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY payment_date DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }
}
