pub mod api;
pub mod config;
pub mod errors;
pub mod mock_data;
pub mod types;
pub mod uploader;
pub mod utils;
pub mod validation;

pub use api::ComplianceClient;
pub use config::{BuildMode, Environment};
pub use errors::{AppError, AppResult};
pub use uploader::{UploadClient, UploadQueue};
