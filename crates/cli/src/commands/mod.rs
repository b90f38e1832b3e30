pub mod complete;
pub mod keywords;

pub use complete::{CompleteOptions, complete_command};
pub use keywords::keywords_command;
