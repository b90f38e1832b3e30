pub mod identifier;
pub mod serde_helpers;

pub use identifier::{is_identifier_name, is_identifier_part, is_identifier_start};
