use crate::snapshot::{ContentId, ViewKind};

/// Tells the host to open `content_id` as a new window or tab so that it
/// ends up at `target_index` (1-based) among the current siblings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoreInstruction {
    pub kind: ViewKind,
    pub content_id: ContentId,
    pub target_index: usize,
}

/// The editor side of the boundary.
///
/// Sibling order is whatever the host considers left to right: windows
/// within the active tab, or tabs within the session.
pub trait Host {
    /// Handle for a window or tab that is about to close.
    type View;
    type Error: std::error::Error;

    fn content_id(&self, view: &Self::View) -> Option<ContentId>;

    /// 1-based ordinal of `view` among its current siblings.
    fn ordinal(&self, view: &Self::View) -> Option<usize>;

    /// Number of siblings `view` has right now, itself included.
    fn sibling_count_of(&self, view: &Self::View) -> Option<usize>;

    /// Live sibling count a restored view of `kind` would join.
    fn sibling_count(&self, kind: ViewKind) -> usize;

    /// Must support inserting before any existing sibling, not only appending.
    fn restore(&mut self, instruction: &RestoreInstruction) -> Result<(), Self::Error>;
}
