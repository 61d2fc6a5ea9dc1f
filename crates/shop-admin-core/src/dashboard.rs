//! Dashboard view state
//!
//! Lists are never patched: every fetch replaces its list wholesale, and a
//! failed fetch leaves it empty. Mutations are always followed by a
//! re-fetch of the affected list, whatever their outcome.

use shop_admin_client::{AdminApi, ClientError, CreateOutcome, Credential, Product, User};
use tracing::{debug, info, warn};

use crate::draft::{DraftError, DraftField, ProductDraft};
use crate::error::DashboardError;
use crate::session::SessionStore;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Product submitted successfully!";
pub const SUBMIT_REFUSED_MESSAGE: &str = "Failed to submit product";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit product. Please try again.";
pub const UNREACHABLE_MESSAGE: &str =
    "Cannot connect to server. Please make sure the backend is running.";

/// Terminal state of one `submit_draft` run.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Stopped by validation; nothing was sent.
    Rejected(DraftError),
    Created,
    /// 2xx response with `success: false`.
    Refused { message: Option<String> },
    Unreachable,
    /// Non-2xx or undecodable response.
    Failed { message: Option<String> },
}

impl SubmitOutcome {
    /// Alert text for the operator.
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Rejected(reason) => reason.to_string(),
            SubmitOutcome::Created => SUBMIT_SUCCESS_MESSAGE.to_string(),
            SubmitOutcome::Refused { message } => message
                .clone()
                .unwrap_or_else(|| SUBMIT_REFUSED_MESSAGE.to_string()),
            SubmitOutcome::Unreachable => UNREACHABLE_MESSAGE.to_string(),
            SubmitOutcome::Failed { message } => message
                .clone()
                .unwrap_or_else(|| SUBMIT_FAILED_MESSAGE.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, SubmitOutcome::Created)
    }
}

pub struct Dashboard<A, S> {
    api: A,
    session: S,
    authorize_submissions: bool,
    users: Vec<User>,
    products: Vec<Product>,
    draft: ProductDraft,
}

impl<A, S> Dashboard<A, S> {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &S {
        &self.session
    }
}

impl<A: AdminApi, S: SessionStore> Dashboard<A, S> {
    pub fn new(api: A, session: S) -> Self {
        Self {
            api,
            session,
            authorize_submissions: false,
            users: Vec::new(),
            products: Vec::new(),
            draft: ProductDraft::default(),
        }
    }

    /// Attach the stored credential to product submissions.
    pub fn authorize_submissions(mut self, enabled: bool) -> Self {
        self.authorize_submissions = enabled;
        self
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.session.get(), Ok(Some(_)))
    }

    pub fn sign_in(&mut self, token: &str) -> Result<(), DashboardError> {
        let credential = Credential::parse(token).ok_or(DashboardError::EmptyToken)?;
        self.session.set(&credential)?;
        info!("Credential stored, signed in");
        Ok(())
    }

    /// Clears the stored credential and everything cached for it.
    pub fn logout(&mut self) -> Result<(), DashboardError> {
        self.users.clear();
        self.products.clear();
        self.draft.reset();
        self.session.clear()?;
        info!("Signed out");
        Ok(())
    }

    /// Read per call, never cached.
    fn credential(&self) -> Result<Credential, DashboardError> {
        self.session.get()?.ok_or(DashboardError::SignedOut)
    }

    /// Initial population: both lists fetched concurrently.
    pub async fn load(&mut self) {
        let credential = match self.credential() {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "Cannot load dashboard");
                self.users.clear();
                self.products.clear();
                return;
            }
        };

        let (users, products) = tokio::join!(
            self.api.list_users(&credential),
            self.api.list_products(&credential)
        );
        self.users = settle("users", users.map_err(DashboardError::from));
        self.products = settle("products", products.map_err(DashboardError::from));
    }

    pub async fn refresh_users(&mut self) {
        let result = match self.credential() {
            Ok(credential) => self
                .api
                .list_users(&credential)
                .await
                .map_err(DashboardError::from),
            Err(e) => Err(e),
        };
        self.users = settle("users", result);
    }

    pub async fn refresh_products(&mut self) {
        let result = match self.credential() {
            Ok(credential) => self
                .api
                .list_products(&credential)
                .await
                .map_err(DashboardError::from),
            Err(e) => Err(e),
        };
        self.products = settle("products", result);
    }

    /// Flips `active` and re-fetches users. Returns the mutation's result;
    /// the refresh runs either way.
    pub async fn toggle_user(
        &mut self,
        user_id: &str,
        current_active: bool,
    ) -> Result<(), DashboardError> {
        let result = match self.credential() {
            Ok(credential) => self
                .api
                .set_user_active(&credential, user_id, !current_active)
                .await
                .map_err(DashboardError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            warn!(user_id, error = %e, "User status update failed");
        }

        self.refresh_users().await;
        result
    }

    /// Flips `available` and re-fetches products. Returns the mutation's
    /// result; the refresh runs either way.
    pub async fn toggle_product(
        &mut self,
        product_id: &str,
        current_available: bool,
    ) -> Result<(), DashboardError> {
        let result = match self.credential() {
            Ok(credential) => self
                .api
                .set_product_available(&credential, product_id, !current_available)
                .await
                .map_err(DashboardError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            warn!(product_id, error = %e, "Product availability update failed");
        }

        self.refresh_products().await;
        result
    }

    pub fn update_draft(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    /// Validates, submits, then re-fetches products. Only `Created` resets
    /// the draft; validation rejections send nothing and skip the refresh.
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let product = match self.draft.validate() {
            Ok(product) => product,
            Err(reason) => {
                debug!(?reason, "Draft rejected");
                return SubmitOutcome::Rejected(reason);
            }
        };

        let credential = if self.authorize_submissions {
            self.session.get().unwrap_or_else(|e| {
                warn!(error = %e, "Submitting without credential");
                None
            })
        } else {
            None
        };

        let outcome = match self.api.create_product(&product, credential).await {
            Ok(CreateOutcome::Created) => {
                info!(name = %product.name, "Product submitted");
                self.draft.reset();
                SubmitOutcome::Created
            }
            Ok(CreateOutcome::Refused { message }) => {
                warn!(?message, "Product submission refused");
                SubmitOutcome::Refused { message }
            }
            Err(ClientError::Network(e)) => {
                warn!(error = %e, "Product submission unreachable");
                SubmitOutcome::Unreachable
            }
            Err(e) => {
                warn!(error = %e, "Product submission failed");
                SubmitOutcome::Failed {
                    message: e.server_message().map(str::to_string),
                }
            }
        };

        self.refresh_products().await;
        outcome
    }
}

fn settle<T>(resource: &str, result: Result<Vec<T>, DashboardError>) -> Vec<T> {
    match result {
        Ok(items) => {
            debug!(resource, count = items.len(), "List refreshed");
            items
        }
        Err(e) => {
            warn!(resource, error = %e, "List fetch failed, showing empty list");
            Vec::new()
        }
    }
}
