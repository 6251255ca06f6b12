pub type WindowId = u32;
pub type TabId = u32;

#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    pub id: WindowId,
    pub buffer: String,
}

/// A tab page: windows stacked top to bottom, one of them focused.
#[derive(Clone, Debug)]
pub struct Tab {
    pub id: TabId,
    pub windows: Vec<Window>,
    pub active: usize,
}

impl Tab {
    pub fn new(id: TabId, window: Window) -> Self {
        Self {
            id,
            windows: vec![window],
            active: 0,
        }
    }

    pub fn current(&self) -> &Window {
        &self.windows[self.active]
    }

    pub fn current_mut(&mut self) -> &mut Window {
        &mut self.windows[self.active]
    }

    pub fn position_of(&self, window: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == window)
    }
}
