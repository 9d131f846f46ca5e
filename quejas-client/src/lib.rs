//! Quejas Client
//!
//! Client-side half of the Quejas back-office: an authenticated HTTP
//! adapter for the backend API, one store per resource holding the
//! current page of data, and the image upload pipeline.
//!
//! # Modules
//!
//! - [`http`]: request/response handling, credential selection, error mapping
//! - [`store`] / [`stores`]: the generic resource store and its instantiations
//! - [`upload`] / [`presign`]: validation, presigned URLs and direct uploads
//! - [`dashboard`]: the container wiring it all together
//!
//! # Example
//!
//! ```no_run
//! use quejas_client::{ClientConfig, Dashboard};
//! use quejas_core::ComplaintFilters;
//!
//! # async fn run() -> quejas_client::ClientResult<()> {
//! let dashboard = Dashboard::from_config(ClientConfig::from_env())?;
//! dashboard.complaints.fetch(ComplaintFilters::default()).await?;
//! for complaint in dashboard.complaints.items() {
//!     println!("{} {}", complaint.id, complaint.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod presign;
pub mod store;
pub mod stores;
pub mod token;
pub mod transport;
pub mod upload;

pub use config::{ClientConfig, EmailConfig, StorageConfig};
pub use dashboard::Dashboard;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use presign::{BackendPresigner, PresignedUpload, Presigner, SigV4Presigner};
pub use store::{Resource, ResourceStore, StoreState};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{HttpTransport, MockTransport, ReqwestTransport};
pub use upload::{ImageUploader, UploadFile, UploadOptions, UploadOutcome, UploadStage, UploadStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
