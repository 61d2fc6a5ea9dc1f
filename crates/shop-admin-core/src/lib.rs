//! # Shop Admin Core
//!
//! Session storage and the dashboard view state: cached user and product
//! lists, the new-product draft, and the fetch/mutate/refetch workflows.

pub mod dashboard;
pub mod draft;
pub mod error;
pub mod session;

pub use dashboard::{Dashboard, SubmitOutcome};
pub use draft::{DraftError, DraftField, ProductDraft};
pub use error::DashboardError;
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
