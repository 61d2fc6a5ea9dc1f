//! # Shop Admin Client
//!
//! Typed access to the admin endpoints of the e-commerce API.

pub mod api;
pub mod credential;
pub mod error;
pub mod http;
pub mod models;
mod response;

pub use api::AdminApi;
pub use credential::Credential;
pub use error::ClientError;
pub use http::HttpAdminClient;
pub use models::{CreateOutcome, NewProduct, Product, User};
pub use reqwest::Url;
