//! Custom request extractors.

mod json_body;
mod validated_json;

pub use json_body::JsonBody;
pub use validated_json::{field_errors, ValidatedJson};
