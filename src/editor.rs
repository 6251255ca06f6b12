use crate::host::{Host, RestoreInstruction};
use crate::plugin::Undoquit;
use crate::snapshot::{ContentId, ViewKind};
use crate::tab::{Tab, TabId, Window, WindowId};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Window(WindowId),
    Tab(TabId),
}

#[derive(Debug, PartialEq, Eq)]
pub enum EditorError {
    LastWindow,
    NoSuchWindow(usize),
    NoSuchTab(usize),
    InvalidIndex { kind: ViewKind, index: usize, count: usize },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::LastWindow => write!(f, "Cannot close last window"),
            EditorError::NoSuchWindow(n) => write!(f, "No window {}", n),
            EditorError::NoSuchTab(n) => write!(f, "No tab {}", n),
            EditorError::InvalidIndex { kind, index, count } => {
                write!(f, "Cannot open {} at {} with {} open", kind, index, count)
            }
        }
    }
}

impl std::error::Error for EditorError {}

/// In-memory editor session: tabs of split windows, each showing a buffer.
pub struct Editor {
    tabs: Vec<Tab>,
    active_tab: usize,
    next_id: u32,
}

impl Editor {
    pub fn new(buffer: &str) -> Self {
        let mut editor = Self {
            tabs: Vec::new(),
            active_tab: 0,
            next_id: 1,
        };
        let window = editor.new_window(buffer);
        let tab_id = editor.alloc_id();
        editor.tabs.push(Tab::new(tab_id, window));
        editor
    }

    pub fn edit(&mut self, buffer: &str) {
        self.tab_mut().current_mut().buffer = buffer.to_string();
    }

    /// Open `buffer` in a new window below the current one.
    pub fn split(&mut self, buffer: &str) {
        let window = self.new_window(buffer);
        let tab = self.tab_mut();
        tab.active += 1;
        let at = tab.active;
        tab.windows.insert(at, window);
    }

    /// Open `buffer` in a new tab after the current one.
    pub fn tabnew(&mut self, buffer: &str) {
        let window = self.new_window(buffer);
        let tab = Tab::new(self.alloc_id(), window);
        self.active_tab += 1;
        self.tabs.insert(self.active_tab, tab);
    }

    /// Focus window `n` (1-based) in the current tab.
    pub fn focus_window(&mut self, n: usize) -> Result<(), EditorError> {
        let tab = self.tab_mut();
        if n == 0 || n > tab.windows.len() {
            return Err(EditorError::NoSuchWindow(n));
        }
        tab.active = n - 1;
        Ok(())
    }

    /// Focus tab `n` (1-based).
    pub fn focus_tab(&mut self, n: usize) -> Result<(), EditorError> {
        if n == 0 || n > self.tabs.len() {
            return Err(EditorError::NoSuchTab(n));
        }
        self.active_tab = n - 1;
        Ok(())
    }

    pub fn tab_first(&mut self) {
        self.active_tab = 0;
    }

    pub fn tab_last(&mut self) {
        self.active_tab = self.tabs.len() - 1;
    }

    /// Close the current window, or its tab if it is the tab's only window.
    pub fn quit(&mut self, undoquit: &mut Undoquit) -> Result<(), EditorError> {
        let tab = self.tab();
        if tab.windows.len() > 1 {
            let view = View::Window(tab.current().id);
            undoquit.before_window_close(&*self, &view);
            self.remove_current_window();
            Ok(())
        } else if self.tabs.len() > 1 {
            let view = View::Tab(tab.id);
            undoquit.before_tab_close(&*self, &view);
            self.remove_current_tab();
            Ok(())
        } else {
            Err(EditorError::LastWindow)
        }
    }

    /// Close every window in the current tab except the focused one.
    pub fn only(&mut self, undoquit: &mut Undoquit) {
        let keep = self.tab().current().id;
        loop {
            let Some(id) = self
                .tab()
                .windows
                .iter()
                .rev()
                .map(|w| w.id)
                .find(|&id| id != keep)
            else {
                break;
            };
            undoquit.before_window_close(&*self, &View::Window(id));
            let tab = self.tab_mut();
            if let Some(pos) = tab.position_of(id) {
                tab.windows.remove(pos);
            }
        }
        self.tab_mut().active = 0;
    }

    /// Close every tab except the current one.
    pub fn tabonly(&mut self, undoquit: &mut Undoquit) {
        let keep = self.tab().id;
        loop {
            let Some(id) = self.tabs.iter().rev().map(|t| t.id).find(|&id| id != keep) else {
                break;
            };
            undoquit.before_tab_close(&*self, &View::Tab(id));
            if let Some(pos) = self.tabs.iter().position(|t| t.id == id) {
                self.tabs.remove(pos);
            }
        }
        self.active_tab = 0;
    }

    /// Buffer of each tab's focused window, first to last.
    pub fn tab_pages(&self) -> Vec<String> {
        self.tabs.iter().map(|t| t.current().buffer.clone()).collect()
    }

    /// Buffers of the current tab's windows, top to bottom.
    pub fn windows(&self) -> Vec<String> {
        self.tab().windows.iter().map(|w| w.buffer.clone()).collect()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn tab(&self) -> &Tab {
        &self.tabs[self.active_tab]
    }

    fn tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active_tab]
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn new_window(&mut self, buffer: &str) -> Window {
        Window {
            id: self.alloc_id(),
            buffer: buffer.to_string(),
        }
    }

    fn remove_current_window(&mut self) {
        let tab = self.tab_mut();
        tab.windows.remove(tab.active);
        // Focus whatever slid into the closed slot, or the window above it
        tab.active = tab.active.min(tab.windows.len() - 1);
    }

    fn remove_current_tab(&mut self) {
        self.tabs.remove(self.active_tab);
        self.active_tab = self.active_tab.min(self.tabs.len() - 1);
    }

    fn find_window(&self, id: WindowId) -> Option<(&Tab, usize)> {
        self.tabs
            .iter()
            .find_map(|t| t.position_of(id).map(|pos| (t, pos)))
    }

    fn find_tab(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn check_index(kind: ViewKind, index: usize, count: usize) -> Result<usize, EditorError> {
        if index == 0 || index > count + 1 {
            return Err(EditorError::InvalidIndex { kind, index, count });
        }
        Ok(index - 1)
    }
}

impl Host for Editor {
    type View = View;
    type Error = EditorError;

    fn content_id(&self, view: &View) -> Option<ContentId> {
        let buffer = match *view {
            View::Window(id) => {
                let (tab, pos) = self.find_window(id)?;
                &tab.windows[pos].buffer
            }
            View::Tab(id) => &self.tabs[self.find_tab(id)?].current().buffer,
        };
        // An unnamed buffer has nothing to reopen
        (!buffer.is_empty()).then(|| ContentId::new(buffer.as_str()))
    }

    fn ordinal(&self, view: &View) -> Option<usize> {
        match *view {
            View::Window(id) => self.find_window(id).map(|(_, pos)| pos + 1),
            View::Tab(id) => self.find_tab(id).map(|pos| pos + 1),
        }
    }

    fn sibling_count_of(&self, view: &View) -> Option<usize> {
        match *view {
            View::Window(id) => self.find_window(id).map(|(tab, _)| tab.windows.len()),
            View::Tab(id) => self.find_tab(id).map(|_| self.tabs.len()),
        }
    }

    fn sibling_count(&self, kind: ViewKind) -> usize {
        match kind {
            ViewKind::Window => self.tab().windows.len(),
            ViewKind::Tab => self.tabs.len(),
        }
    }

    fn restore(&mut self, instruction: &RestoreInstruction) -> Result<(), EditorError> {
        let buffer = instruction.content_id.as_str();
        let count = self.sibling_count(instruction.kind);
        let at = Self::check_index(instruction.kind, instruction.target_index, count)?;

        match instruction.kind {
            ViewKind::Window => {
                let window = self.new_window(buffer);
                let tab = self.tab_mut();
                tab.windows.insert(at, window);
                tab.active = at;
            }
            ViewKind::Tab => {
                let window = self.new_window(buffer);
                let tab = Tab::new(self.alloc_id(), window);
                self.tabs.insert(at, tab);
                self.active_tab = at;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_windows() -> Editor {
        let mut editor = Editor::new("one.txt");
        editor.split("two.txt");
        editor.split("three.txt");
        editor
    }

    fn three_tabs() -> Editor {
        let mut editor = Editor::new("one.txt");
        editor.tabnew("two.txt");
        editor.tabnew("three.txt");
        editor
    }

    #[test]
    fn split_opens_below_and_focuses() {
        let mut editor = three_windows();
        assert_eq!(editor.windows(), vec!["one.txt", "two.txt", "three.txt"]);
        assert_eq!(editor.tab().active, 2);

        editor.focus_window(1).unwrap();
        editor.split("four.txt");
        assert_eq!(
            editor.windows(),
            vec!["one.txt", "four.txt", "two.txt", "three.txt"]
        );
        assert_eq!(editor.tab().active, 1);
    }

    #[test]
    fn quit_closes_window_then_tab() {
        let mut undoquit = Undoquit::default();
        let mut editor = Editor::new("one.txt");
        editor.tabnew("two.txt");
        editor.split("three.txt");

        editor.quit(&mut undoquit).unwrap();
        assert_eq!(editor.windows(), vec!["two.txt"]);
        editor.quit(&mut undoquit).unwrap();
        assert_eq!(editor.tab_pages(), vec!["one.txt"]);

        let kinds: Vec<ViewKind> = undoquit.history().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec![ViewKind::Tab, ViewKind::Window]);
    }

    #[test]
    fn last_window_cannot_be_closed() {
        let mut undoquit = Undoquit::default();
        let mut editor = Editor::new("one.txt");
        assert_eq!(editor.quit(&mut undoquit), Err(EditorError::LastWindow));
        assert!(undoquit.stack().is_empty());
    }

    #[test]
    fn closing_focuses_the_window_that_took_its_place() {
        let mut undoquit = Undoquit::default();
        let mut editor = three_windows();
        editor.focus_window(2).unwrap();
        editor.quit(&mut undoquit).unwrap();
        assert_eq!(editor.tab().current().buffer, "three.txt");

        editor.quit(&mut undoquit).unwrap();
        assert_eq!(editor.tab().current().buffer, "one.txt");
    }

    #[test]
    fn unnamed_buffer_is_not_recorded() {
        let mut undoquit = Undoquit::default();
        let mut editor = Editor::new("one.txt");
        editor.split("");
        editor.quit(&mut undoquit).unwrap();
        assert_eq!(editor.windows(), vec!["one.txt"]);
        assert!(undoquit.stack().is_empty());
    }

    #[test]
    fn only_records_each_closed_window() {
        let mut undoquit = Undoquit::default();
        let mut editor = three_windows();
        editor.focus_window(2).unwrap();
        editor.only(&mut undoquit);
        assert_eq!(editor.windows(), vec!["two.txt"]);
        assert_eq!(undoquit.stack().len(), 2);

        undoquit.undo_quit(&mut editor).unwrap();
        undoquit.undo_quit(&mut editor).unwrap();
        assert_eq!(editor.windows(), vec!["one.txt", "two.txt", "three.txt"]);
    }

    #[test]
    fn tabonly_records_each_closed_tab() {
        let mut undoquit = Undoquit::default();
        let mut editor = three_tabs();
        editor.focus_tab(2).unwrap();
        editor.tabonly(&mut undoquit);
        assert_eq!(editor.tab_pages(), vec!["two.txt"]);

        undoquit.undo_quit(&mut editor).unwrap();
        undoquit.undo_quit(&mut editor).unwrap();
        assert_eq!(editor.tab_pages(), vec!["one.txt", "two.txt", "three.txt"]);
    }

    #[test]
    fn restore_rejects_out_of_range_index() {
        let mut editor = three_tabs();
        let instruction = RestoreInstruction {
            kind: ViewKind::Tab,
            content_id: ContentId::new("four.txt"),
            target_index: 5,
        };
        assert_eq!(
            editor.restore(&instruction),
            Err(EditorError::InvalidIndex {
                kind: ViewKind::Tab,
                index: 5,
                count: 3
            })
        );
        assert_eq!(editor.tab_pages().len(), 3);
    }

    #[test]
    fn restore_inserts_before_existing_sibling() {
        let mut editor = three_windows();
        let instruction = RestoreInstruction {
            kind: ViewKind::Window,
            content_id: ContentId::new("four.txt"),
            target_index: 2,
        };
        editor.restore(&instruction).unwrap();
        assert_eq!(
            editor.windows(),
            vec!["one.txt", "four.txt", "two.txt", "three.txt"]
        );
        assert_eq!(editor.tab().current().buffer, "four.txt");
    }

    #[test]
    fn focus_out_of_range_is_an_error() {
        let mut editor = three_tabs();
        assert_eq!(editor.focus_tab(4), Err(EditorError::NoSuchTab(4)));
        assert_eq!(editor.focus_window(0), Err(EditorError::NoSuchWindow(0)));
    }
}
