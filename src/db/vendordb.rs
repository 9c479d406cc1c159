// db/vendordb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::vendormodels::{ApprovalStatus, EventVendor, Vendor, VendorPackage};

const VENDOR_COLUMNS: &str = "id, user_id, company_name, service_type, address, \
     main_photo_url, detail_photo_url, details, rating, approval_status, created_at, updated_at";

const PACKAGE_COLUMNS: &str = "id, vendor_id, package_name, description, price, \
     features, duration, is_active, created_at, updated_at";

#[async_trait]
pub trait VendorExt {
    async fn save_vendor(
        &self,
        user_id: Uuid,
        company_name: String,
        service_type: Option<String>,
        address: Option<String>,
        main_photo_url: Option<String>,
        detail_photo_url: Option<String>,
        details: Option<String>,
    ) -> Result<Vendor, Error>;

    async fn get_vendor(&self, vendor_id: Uuid) -> Result<Option<Vendor>, Error>;

    async fn get_vendor_by_user(&self, user_id: Uuid) -> Result<Option<Vendor>, Error>;

    async fn get_vendors(&self) -> Result<Vec<Vendor>, Error>;

    async fn get_vendors_by_status(&self, status: ApprovalStatus) -> Result<Vec<Vendor>, Error>;

    async fn vendor_exists_for_user(&self, user_id: Uuid) -> Result<bool, Error>;

    async fn update_vendor(
        &self,
        vendor_id: Uuid,
        company_name: Option<String>,
        service_type: Option<String>,
        address: Option<String>,
        main_photo_url: Option<String>,
        detail_photo_url: Option<String>,
        details: Option<String>,
    ) -> Result<Vendor, Error>;

    async fn update_vendor_status(
        &self,
        vendor_id: Uuid,
        status: ApprovalStatus,
    ) -> Result<Vendor, Error>;

    async fn update_vendor_rating(&self, vendor_id: Uuid, rating: f64) -> Result<Vendor, Error>;

    async fn count_vendors(&self) -> Result<i64, Error>;

    /// Idempotent provisioning of the support vendor profile, guarded by the
    /// one-vendor-per-user unique constraint.
    async fn ensure_support_vendor(
        &self,
        user_id: Uuid,
        company_name: &str,
        service_type: &str,
        address: &str,
    ) -> Result<Vendor, Error>;

    // Packages
    async fn save_package(
        &self,
        vendor_id: Uuid,
        package_name: String,
        description: Option<String>,
        price: Option<f64>,
        features: Vec<String>,
        duration: Option<String>,
        is_active: bool,
    ) -> Result<VendorPackage, Error>;

    async fn update_package(
        &self,
        package_id: Uuid,
        package_name: String,
        description: Option<String>,
        price: Option<f64>,
        features: Vec<String>,
        duration: Option<String>,
        is_active: Option<bool>,
    ) -> Result<VendorPackage, Error>;

    async fn delete_package(&self, package_id: Uuid) -> Result<u64, Error>;

    async fn get_package(&self, package_id: Uuid) -> Result<Option<VendorPackage>, Error>;

    async fn get_packages_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<VendorPackage>, Error>;

    async fn get_active_packages_by_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<VendorPackage>, Error>;

    async fn get_event_assignments_by_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<EventVendor>, Error>;
}

#[async_trait]
impl VendorExt for DBClient {
    async fn save_vendor(
        &self,
        user_id: Uuid,
        company_name: String,
        service_type: Option<String>,
        address: Option<String>,
        main_photo_url: Option<String>,
        detail_photo_url: Option<String>,
        details: Option<String>,
    ) -> Result<Vendor, Error> {
        sqlx::query_as::<_, Vendor>(&format!(
            r#"
            INSERT INTO vendors
                (user_id, company_name, service_type, address, main_photo_url,
                 detail_photo_url, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(company_name)
        .bind(service_type)
        .bind(address)
        .bind(main_photo_url)
        .bind(detail_photo_url)
        .bind(details)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_vendor(&self, vendor_id: Uuid) -> Result<Option<Vendor>, Error> {
        sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1"
        ))
        .bind(vendor_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_vendor_by_user(&self, user_id: Uuid) -> Result<Option<Vendor>, Error> {
        sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_vendors(&self) -> Result<Vec<Vendor>, Error> {
        sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_vendors_by_status(&self, status: ApprovalStatus) -> Result<Vec<Vendor>, Error> {
        sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE approval_status = $1 ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    async fn vendor_exists_for_user(&self, user_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM vendors WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_vendor(
        &self,
        vendor_id: Uuid,
        company_name: Option<String>,
        service_type: Option<String>,
        address: Option<String>,
        main_photo_url: Option<String>,
        detail_photo_url: Option<String>,
        details: Option<String>,
    ) -> Result<Vendor, Error> {
        sqlx::query_as::<_, Vendor>(&format!(
            r#"
            UPDATE vendors
            SET company_name = COALESCE($2, company_name),
                service_type = COALESCE($3, service_type),
                address = COALESCE($4, address),
                main_photo_url = COALESCE($5, main_photo_url),
                detail_photo_url = COALESCE($6, detail_photo_url),
                details = COALESCE($7, details),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(vendor_id)
        .bind(company_name)
        .bind(service_type)
        .bind(address)
        .bind(main_photo_url)
        .bind(detail_photo_url)
        .bind(details)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_vendor_status(
        &self,
        vendor_id: Uuid,
        status: ApprovalStatus,
    ) -> Result<Vendor, Error> {
        sqlx::query_as::<_, Vendor>(&format!(
            r#"
            UPDATE vendors
            SET approval_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(vendor_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_vendor_rating(&self, vendor_id: Uuid, rating: f64) -> Result<Vendor, Error> {
        sqlx::query_as::<_, Vendor>(&format!(
            r#"
            UPDATE vendors
            SET rating = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(vendor_id)
        .bind(rating)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_vendors(&self) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vendors")
            .fetch_one(&self.pool)
            .await
    }

    async fn ensure_support_vendor(
        &self,
        user_id: Uuid,
        company_name: &str,
        service_type: &str,
        address: &str,
    ) -> Result<Vendor, Error> {
        sqlx::query(
            r#"
            INSERT INTO vendors (user_id, company_name, service_type, address, approval_status)
            VALUES ($1, $2, $3, $4, 'approved'::approval_status)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(company_name)
        .bind(service_type)
        .bind(address)
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn save_package(
        &self,
        vendor_id: Uuid,
        package_name: String,
        description: Option<String>,
        price: Option<f64>,
        features: Vec<String>,
        duration: Option<String>,
        is_active: bool,
    ) -> Result<VendorPackage, Error> {
        sqlx::query_as::<_, VendorPackage>(&format!(
            r#"
            INSERT INTO vendor_packages
                (vendor_id, package_name, description, price, features, duration, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PACKAGE_COLUMNS}
            "#
        ))
        .bind(vendor_id)
        .bind(package_name)
        .bind(description)
        .bind(price)
        .bind(features)
        .bind(duration)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_package(
        &self,
        package_id: Uuid,
        package_name: String,
        description: Option<String>,
        price: Option<f64>,
        features: Vec<String>,
        duration: Option<String>,
        is_active: Option<bool>,
    ) -> Result<VendorPackage, Error> {
        sqlx::query_as::<_, VendorPackage>(&format!(
            r#"
            UPDATE vendor_packages
            SET package_name = $2,
                description = $3,
                price = $4,
                features = $5,
                duration = $6,
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PACKAGE_COLUMNS}
            "#
        ))
        .bind(package_id)
        .bind(package_name)
        .bind(description)
        .bind(price)
        .bind(features)
        .bind(duration)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_package(&self, package_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM vendor_packages WHERE id = $1")
            .bind(package_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_package(&self, package_id: Uuid) -> Result<Option<VendorPackage>, Error> {
        sqlx::query_as::<_, VendorPackage>(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM vendor_packages WHERE id = $1"
        ))
        .bind(package_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_packages_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<VendorPackage>, Error> {
        sqlx::query_as::<_, VendorPackage>(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM vendor_packages WHERE vendor_id = $1 ORDER BY created_at"
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_active_packages_by_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<VendorPackage>, Error> {
        sqlx::query_as::<_, VendorPackage>(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM vendor_packages WHERE vendor_id = $1 AND is_active = true ORDER BY created_at"
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_event_assignments_by_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<EventVendor>, Error> {
        sqlx::query_as::<_, EventVendor>(
            "SELECT id, event_id, vendor_id, assigned_service, status FROM event_vendors WHERE vendor_id = $1",
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
    }
}
