//! Dashboard state container
//!
//! Created once at start-up and handed to whatever drives the UI or CLI.
//! Every store shares one [`ApiClient`], and so one token.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::presign::{BackendPresigner, Presigner, SigV4Presigner};
use crate::stores::{
    BranchStore, ComplaintStore, EmailStore, InstructorStore, ManagerStore, RatingStore,
};
use crate::token::{FileTokenStore, TokenStore};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::upload::ImageUploader;

/// All client-side state of the dashboard
pub struct Dashboard {
    pub config: ClientConfig,
    pub client: Arc<ApiClient>,
    pub branches: BranchStore,
    pub complaints: ComplaintStore,
    pub ratings: RatingStore,
    pub instructors: InstructorStore,
    pub managers: ManagerStore,
    pub email: EmailStore,
    pub uploader: ImageUploader,
}

impl Dashboard {
    /// Build over an explicit transport and token store
    ///
    /// Uploads are presigned locally when storage credentials are
    /// configured, otherwise by the backend.
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let client = Arc::new(ApiClient::new(&config, transport.clone(), tokens));

        let presigner: Arc<dyn Presigner> = match SigV4Presigner::new(config.storage.clone()) {
            Ok(presigner) => {
                debug!(bucket = %config.storage.bucket, "Presigning uploads locally");
                Arc::new(presigner)
            }
            Err(_) => {
                debug!("No storage credentials, presigning uploads through the backend");
                Arc::new(BackendPresigner::new(client.clone()))
            }
        };

        let uploader = ImageUploader::new(
            presigner,
            transport,
            config.upload.clone(),
            config.image_domain.clone(),
        );

        info!(api_url = %client.base_url(), "Dashboard initialized");

        Self {
            branches: BranchStore::new(client.clone()),
            complaints: ComplaintStore::new(client.clone()),
            ratings: RatingStore::new(client.clone()),
            instructors: InstructorStore::new(client.clone()),
            managers: ManagerStore::new(client.clone()),
            email: EmailStore::new(client.clone(), &config),
            uploader,
            client,
            config,
        }
    }

    /// Build with reqwest and the token file under the state directory
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.http_timeout_secs)?);
        let tokens = Arc::new(FileTokenStore::new(&config.state_dir));
        Ok(Self::new(config, transport, tokens))
    }

    /// Return every store and the uploader to their initial state
    pub fn reset(&self) {
        self.branches.reset();
        self.complaints.reset();
        self.ratings.reset();
        self.instructors.reset();
        self.managers.reset();
        self.email.reset();
        self.uploader.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;
    use crate::transport::{Method, MockTransport};
    use quejas_core::BranchFilters;
    use serde_json::json;

    #[tokio::test]
    async fn test_stores_share_one_token() {
        let mock = MockTransport::shared();
        mock.on(
            Method::GET,
            "/branches",
            200,
            json!({"data": [{"id": 1, "name": "Polanco"}], "page": 1, "limit": 10, "total": 1, "totalPages": 1}),
        );
        let config = ClientConfig::default().with_api_url("http://mock.local");
        let dashboard = Dashboard::new(config, mock.clone(), Arc::new(MemoryTokenStore::new()));

        dashboard.client.set_token("shared");
        dashboard.branches.fetch(BranchFilters::default()).await.unwrap();

        assert_eq!(mock.last_request().unwrap().header("Authorization"), Some("Bearer shared"));
        assert_eq!(dashboard.branches.items().len(), 1);

        dashboard.reset();
        assert!(dashboard.branches.items().is_empty());
    }
}
