use crate::host::{Host, RestoreInstruction};
use crate::snapshot::{self, Snapshot, ViewKind};
use crate::stack::UndoStack;

/// The entry points an editor integration calls: the two close hooks and
/// the undo command.
#[derive(Debug, Default)]
pub struct Undoquit {
    stack: UndoStack,
}

impl Undoquit {
    pub fn new(stack: UndoStack) -> Self {
        Self { stack }
    }

    /// Must run while the window is still open.
    pub fn before_window_close<H: Host>(&mut self, host: &H, view: &H::View) {
        self.stack.on_close(snapshot::capture(host, view, ViewKind::Window));
    }

    /// Must run while the tab is still open.
    pub fn before_tab_close<H: Host>(&mut self, host: &H, view: &H::View) {
        self.stack.on_close(snapshot::capture(host, view, ViewKind::Tab));
    }

    /// Reopen the most recently closed view.
    ///
    /// `Ok(None)` means there was nothing to undo. A host error is passed
    /// back as is; the snapshot is not put back on the stack.
    pub fn undo_quit<H: Host>(
        &mut self,
        host: &mut H,
    ) -> Result<Option<RestoreInstruction>, H::Error> {
        let Some(instruction) = self.stack.undo(&*host) else {
            log::info!("Nothing to undo");
            return Ok(None);
        };

        if let Err(e) = host.restore(&instruction) {
            log::error!(
                "Failed to restore {} {}: {}",
                instruction.kind,
                instruction.content_id,
                e
            );
            return Err(e);
        }

        log::info!(
            "Restored {} {} at {}",
            instruction.kind,
            instruction.content_id,
            instruction.target_index
        );
        Ok(Some(instruction))
    }

    /// Most recent first.
    pub fn history(&self) -> impl Iterator<Item = &Snapshot> {
        self.stack.history()
    }

    pub fn clear(&mut self) -> usize {
        let dropped = self.stack.clear();
        log::info!("Cleared {} closed views", dropped);
        dropped
    }

    pub fn stack(&self) -> &UndoStack {
        &self.stack
    }
}
