//! Quejas Core - Data Model
//!
//! Types shared by every part of the Quejas back-office client: the
//! entities the backend owns (complaints, ratings, branches, instructors,
//! managers), the DTOs sent to it, query filters, pagination envelopes and
//! the statistics payloads the dashboard renders.
//!
//! # Modules
//!
//! - [`types`]: entities, DTOs, filters and envelopes
//! - [`nps`]: Net Promoter Score classification
//! - [`error`]: validation errors raised before anything reaches the network

pub mod error;
pub mod nps;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use nps::{NpsBreakdown, NpsCategory};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
