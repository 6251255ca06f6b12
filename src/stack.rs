use crate::host::{Host, RestoreInstruction};
use crate::snapshot::Snapshot;

/// Session-scoped stack of closed views, most recent on top.
#[derive(Debug, Default)]
pub struct UndoStack {
    entries: Vec<Snapshot>,
    max_entries: Option<usize>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack that drops its oldest entry once it holds more than `max_entries`.
    pub fn with_capacity_limit(max_entries: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn on_close(&mut self, snapshot: Option<Snapshot>) {
        let Some(snapshot) = snapshot else {
            return;
        };

        log::debug!(
            "Pushed {} {} ({} on stack)",
            snapshot.kind(),
            snapshot.content_id(),
            self.entries.len() + 1
        );
        self.entries.push(snapshot);

        if let Some(max) = self.max_entries {
            while self.entries.len() > max {
                let dropped = self.entries.remove(0);
                log::debug!(
                    "History full, forgot {} {}",
                    dropped.kind(),
                    dropped.content_id()
                );
            }
        }
    }

    /// Pop the most recently closed view and work out where it goes back.
    ///
    /// The popped snapshot is gone for good, whatever the host later makes
    /// of the instruction.
    pub fn undo<H: Host>(&mut self, host: &H) -> Option<RestoreInstruction> {
        let snapshot = self.entries.pop()?;
        let live = host.sibling_count(snapshot.kind());
        let target_index = resolve_target(&snapshot, live);

        log::debug!(
            "Popped {} {}: was {}/{}, now {} siblings, target {}",
            snapshot.kind(),
            snapshot.content_id(),
            snapshot.position(),
            snapshot.sibling_count_at_close(),
            live,
            target_index
        );

        Some(RestoreInstruction {
            kind: snapshot.kind(),
            content_id: snapshot.content_id().clone(),
            target_index,
        })
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// Most recent first.
    pub fn history(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many snapshots were discarded.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }
}

/// Ordinal a restored view should take among `live` current siblings.
///
/// A view that was last when it closed goes back at the end, however the
/// layout changed since. Anything else returns to its old ordinal, clamped
/// into `1..=live + 1`.
pub fn resolve_target(snapshot: &Snapshot, live: usize) -> usize {
    if snapshot.was_last() {
        live + 1
    } else {
        snapshot.position().clamp(1, live + 1)
    }
}
