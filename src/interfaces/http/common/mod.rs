//! Pieces shared by all HTTP modules

pub mod api_response;
pub mod errors;
pub mod validated_json;

pub use api_response::ApiResponse;
pub use errors::{bad_request, domain_error, ApiError};
pub use validated_json::ValidatedJson;
