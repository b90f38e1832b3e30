use super::position::Position;
use crate::runtime::RuntimeContext;

/// Input of one completion request; immutable while it is served
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub source_text: &'a str,
    /// Byte offset of the cursor. Out-of-range values are clamped.
    pub cursor_offset: usize,
    pub runtime_context: Option<RuntimeContext<'a>>,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(source_text: &'a str, cursor_offset: usize) -> Self {
        Self {
            source_text,
            cursor_offset,
            runtime_context: None,
        }
    }

    /// Cursor at the end of the text
    pub fn at_end(source_text: &'a str) -> Self {
        Self::new(source_text, source_text.len())
    }

    pub fn at_position(source_text: &'a str, position: Position) -> Self {
        Self::new(source_text, position.to_offset(source_text))
    }

    pub fn with_runtime(mut self, runtime: RuntimeContext<'a>) -> Self {
        self.runtime_context = Some(runtime);
        self
    }
}
