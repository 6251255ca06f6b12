use crate::host::Host;
use chrono::{DateTime, Local};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Window,
    Tab,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Window => write!(f, "window"),
            ViewKind::Tab => write!(f, "tab"),
        }
    }
}

/// Identifies the buffer a view was showing, e.g. a file path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a window or tab looked like right before it was closed.
///
/// Fields are private so a snapshot cannot change after capture.
#[derive(Clone, Debug)]
pub struct Snapshot {
    content_id: ContentId,
    kind: ViewKind,
    position: usize,
    sibling_count_at_close: usize,
    closed_at: DateTime<Local>,
}

impl Snapshot {
    pub fn new(
        content_id: ContentId,
        kind: ViewKind,
        position: usize,
        sibling_count_at_close: usize,
    ) -> Self {
        Self {
            content_id,
            kind,
            position,
            sibling_count_at_close,
            closed_at: Local::now(),
        }
    }

    pub fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// 1-based ordinal among siblings at close time.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn sibling_count_at_close(&self) -> usize {
        self.sibling_count_at_close
    }

    /// True when the view was the last (rightmost / bottom) sibling.
    pub fn was_last(&self) -> bool {
        self.position >= self.sibling_count_at_close
    }

    pub fn closed_at(&self) -> DateTime<Local> {
        self.closed_at
    }
}

/// Record a view that is about to close.
///
/// Best effort: if the host cannot answer a query, or answers nonsense, the
/// close simply goes unrecorded.
pub fn capture<H: Host>(host: &H, view: &H::View, kind: ViewKind) -> Option<Snapshot> {
    let Some(content_id) = host.content_id(view) else {
        log::debug!("Not recording {} close: content unknown", kind);
        return None;
    };
    let (Some(position), Some(count)) = (host.ordinal(view), host.sibling_count_of(view)) else {
        log::debug!(
            "Not recording {} close of {}: position unknown",
            kind,
            content_id
        );
        return None;
    };

    if position == 0 || position > count {
        log::debug!(
            "Not recording {} close of {}: ordinal {} out of {} siblings",
            kind,
            content_id,
            position,
            count
        );
        return None;
    }

    log::debug!("Captured {} {} at {}/{}", kind, content_id, position, count);
    Some(Snapshot::new(content_id, kind, position, count))
}
