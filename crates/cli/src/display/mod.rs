pub mod formatter;

pub use formatter::{format_candidates, insert_text, kind_label, origin_label};
