mod azure;
mod compare;
mod error;
mod form;
mod health;
mod index;
mod responses;
mod upload;
mod validate;

pub use azure::{debug_azure_handler, test_azure_handler};
pub use compare::compare_handler;
pub use error::{ApiError, ErrorResponse};
pub use form::UploadForm;
pub use health::health_handler;
pub use index::index_handler;
pub use upload::upload_handler;
pub use validate::validate_documents_handler;
