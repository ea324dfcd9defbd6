//! Explicit per-session state: a struct owned by the session task instead of a
//! stringly-keyed session store.

use std::sync::Arc;

use crate::QaPipeline;

/// State private to one chat session. At most one pipeline and one document
/// string; both set by `on_start`, read by `on_message`.
#[derive(Default, Clone)]
pub struct SessionState {
    /// Request pipeline built once when the session starts; immutable afterward.
    pub pipeline: Option<Arc<QaPipeline>>,
    /// Extracted document text, already truncated to the character budget.
    /// Overwritten only by a new upload (not supported mid-session).
    pub document: Option<String>,
}
