//! Dashboard errors

use shop_admin_client::ClientError;
use thiserror::Error;

use crate::session::SessionError;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Not signed in")]
    SignedOut,

    #[error("Token must not be empty")]
    EmptyToken,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
