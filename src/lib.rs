//! Client for the Bootcampspot instructor API.
//!
//! [`SessionContext`] logs in, loads the account's course enrollments and
//! fetches grades, sessions, attendance and weekly feedback, reshaped into
//! nested maps keyed by names rather than the provider's flat record lists.

pub mod context;
pub mod error;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod selection;

pub use context::{SessionContext, SessionQuery};
pub use error::{BcsError, Result};
pub use normalize::GradeOptions;
pub use provider::{HttpProvider, NoopProvider, Provider, ProviderConfig};
pub use selection::{Selection, SelectionState};
