use crate::tab::Tab;

/// One line naming every tab, the active one in brackets.
pub struct Tabline {
    width: usize,
}

impl Tabline {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn draw(&self, tabs: &[Tab], active_idx: usize) -> String {
        let mut line = String::new();

        for (i, tab) in tabs.iter().enumerate() {
            let label = format!("{} {}", i + 1, tab.current().buffer);
            let block = if i == active_idx {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            };
            line.push_str(&block);
        }

        // Cut on a char boundary so long buffer names stay valid UTF-8
        if line.chars().count() > self.width {
            line = line.chars().take(self.width).collect();
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::Window;

    fn tab(id: u32, buffer: &str) -> Tab {
        Tab::new(
            id,
            Window {
                id: id + 100,
                buffer: buffer.to_string(),
            },
        )
    }

    #[test]
    fn marks_active_tab() {
        let tabs = vec![tab(1, "one.txt"), tab(2, "two.txt")];
        let line = Tabline::new(80).draw(&tabs, 1);
        assert_eq!(line, " 1 one.txt [2 two.txt]");
    }

    #[test]
    fn truncates_to_width() {
        let tabs = vec![tab(1, "one.txt"), tab(2, "two.txt")];
        let line = Tabline::new(5).draw(&tabs, 0);
        assert_eq!(line, "[1 on");
    }
}
