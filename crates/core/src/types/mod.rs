pub mod candidate;
pub mod position;
pub mod request;

// Re-export commonly used types
pub use candidate::{Candidate, CandidateKind, Origin, RankedResult};
pub use position::{Position, clamp_offset};
pub use request::CompletionRequest;
