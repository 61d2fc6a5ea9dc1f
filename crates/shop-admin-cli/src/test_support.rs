//! In-memory admin API for exercising the TUI without a server.

use async_trait::async_trait;
use parking_lot::Mutex;
use shop_admin_client::{AdminApi, ClientError, CreateOutcome, Credential, NewProduct, Product, User};
use shop_admin_core::{Dashboard, MemorySessionStore};

use crate::app::App;

#[derive(Default)]
pub struct StubApi {
    pub users: Mutex<Vec<User>>,
    pub products: Mutex<Vec<Product>>,
    pub created: Mutex<Vec<NewProduct>>,
    pub fail_mutations: Mutex<bool>,
}

impl StubApi {
    pub fn seeded() -> Self {
        let stub = Self::default();
        *stub.users.lock() = vec![
            User {
                id: "u1".to_string(),
                email: "ada@shop.test".to_string(),
                active: true,
            },
            User {
                id: "u2".to_string(),
                email: "bob@shop.test".to_string(),
                active: false,
            },
        ];
        *stub.products.lock() = vec![Product {
            id: "p1".to_string(),
            name: "Desk Lamp".to_string(),
            price: 25.0,
            image: "https://x.test/lamp.png".to_string(),
            description: "Warm light".to_string(),
            category: "home".to_string(),
            company: "Acme".to_string(),
            available: true,
        }];
        stub
    }

    fn mutation_error(&self) -> Option<ClientError> {
        if *self.fail_mutations.lock() {
            Some(ClientError::Request {
                status: 500,
                message: Some("boom".to_string()),
            })
        } else {
            None
        }
    }
}

#[async_trait]
impl AdminApi for StubApi {
    async fn list_users(&self, _credential: &Credential) -> Result<Vec<User>, ClientError> {
        Ok(self.users.lock().clone())
    }

    async fn list_products(&self, _credential: &Credential) -> Result<Vec<Product>, ClientError> {
        Ok(self.products.lock().clone())
    }

    async fn set_user_active(
        &self,
        _credential: &Credential,
        user_id: &str,
        active: bool,
    ) -> Result<(), ClientError> {
        if let Some(e) = self.mutation_error() {
            return Err(e);
        }
        for user in self.users.lock().iter_mut().filter(|u| u.id == user_id) {
            user.active = active;
        }
        Ok(())
    }

    async fn set_product_available(
        &self,
        _credential: &Credential,
        product_id: &str,
        available: bool,
    ) -> Result<(), ClientError> {
        if let Some(e) = self.mutation_error() {
            return Err(e);
        }
        for product in self.products.lock().iter_mut().filter(|p| p.id == product_id) {
            product.available = available;
        }
        Ok(())
    }

    async fn create_product(
        &self,
        product: &NewProduct,
        _credential: Option<Credential>,
    ) -> Result<CreateOutcome, ClientError> {
        self.created.lock().push(product.clone());
        Ok(CreateOutcome::Created)
    }
}

pub fn signed_in_app() -> App<StubApi, MemorySessionStore> {
    let session = MemorySessionStore::with_credential(Credential::new("tok"));
    App::new(Dashboard::new(StubApi::seeded(), session))
}
