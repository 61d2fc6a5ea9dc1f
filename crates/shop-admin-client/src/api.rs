//! Admin API port

use async_trait::async_trait;

use crate::credential::Credential;
use crate::error::ClientError;
use crate::models::{CreateOutcome, NewProduct, Product, User};

pub const USERS_PATH: &[&str] = &["api", "admin", "users"];
pub const ADMIN_PRODUCTS_PATH: &[&str] = &["api", "admin", "products"];
pub const PRODUCTS_PATH: &[&str] = &["api", "products"];

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_users(&self, credential: &Credential) -> Result<Vec<User>, ClientError>;

    async fn list_products(&self, credential: &Credential) -> Result<Vec<Product>, ClientError>;

    async fn set_user_active(
        &self,
        credential: &Credential,
        user_id: &str,
        active: bool,
    ) -> Result<(), ClientError>;

    async fn set_product_available(
        &self,
        credential: &Credential,
        product_id: &str,
        available: bool,
    ) -> Result<(), ClientError>;

    /// Sent without `Authorization` when `credential` is `None`.
    async fn create_product(
        &self,
        product: &NewProduct,
        credential: Option<Credential>,
    ) -> Result<CreateOutcome, ClientError>;
}
