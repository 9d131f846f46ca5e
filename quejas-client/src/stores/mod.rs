//! Resource Store Instantiations
//!
//! One module per backend resource. Each declares a [`Resource`] and adds
//! its resource-specific actions to [`ResourceStore`].
//!
//! [`Resource`]: crate::store::Resource
//! [`ResourceStore`]: crate::store::ResourceStore

pub mod branches;
pub mod complaints;
pub mod email;
pub mod instructors;
pub mod managers;
pub mod ratings;

pub use branches::{BranchStore, Branches};
pub use complaints::{ComplaintExtra, ComplaintStore, Complaints};
pub use email::{EmailState, EmailStore};
pub use instructors::{InstructorRatings, InstructorStore, Instructors};
pub use managers::{ManagerStore, Managers};
pub use ratings::{RatingInsights, RatingStore, Ratings};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::config::ClientConfig;
    use crate::http::ApiClient;
    use crate::token::MemoryTokenStore;
    use crate::transport::MockTransport;

    pub fn config() -> ClientConfig {
        ClientConfig::default().with_api_url("http://mock.local")
    }

    pub fn client() -> (ApiClient, Arc<MockTransport>) {
        let mock = MockTransport::shared();
        let client = ApiClient::new(&config(), mock.clone(), Arc::new(MemoryTokenStore::new()));
        (client, mock)
    }
}
