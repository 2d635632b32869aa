mod http_api;
mod response;
mod tagging_api;

#[cfg(test)]
pub(crate) mod fake;

pub use http_api::HttpTaggingApi;
pub use response::{parse_tagging_response, parse_upload_response};
pub use tagging_api::TaggingApi;
