use crate::tab::Tab;

/// Basic horizontal splits: share `screen_height` rows evenly among the
/// tab's windows, each ending in a status line with its buffer name.
pub fn tile_windows(tab: &Tab, screen_width: usize, screen_height: usize) -> Vec<String> {
    let num_windows = tab.windows.len();

    if num_windows == 0 {
        return Vec::new();
    }

    // Every window needs at least its status line
    let height_per_window = (screen_height / num_windows).max(1);
    let mut rows = Vec::with_capacity(height_per_window * num_windows);

    for (i, window) in tab.windows.iter().enumerate() {
        for _ in 1..height_per_window {
            rows.push("~".to_string());
        }

        let marker = if i == tab.active { '>' } else { ' ' };
        let mut status = format!("{} {}", marker, window.buffer);
        let fill = screen_width.saturating_sub(status.chars().count());
        status.extend(std::iter::repeat_n('-', fill));
        rows.push(status);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::Window;

    fn two_windows() -> Tab {
        let mut tab = Tab::new(
            1,
            Window {
                id: 2,
                buffer: "one.txt".to_string(),
            },
        );
        tab.windows.push(Window {
            id: 3,
            buffer: "two.txt".to_string(),
        });
        tab.active = 1;
        tab
    }

    #[test]
    fn splits_height_evenly() {
        let rows = tile_windows(&two_windows(), 12, 4);
        assert_eq!(rows, vec!["~", "  one.txt---", "~", "> two.txt---"]);
    }

    #[test]
    fn tiny_screen_still_shows_every_status_line() {
        let rows = tile_windows(&two_windows(), 0, 1);
        assert_eq!(rows, vec!["  one.txt", "> two.txt"]);
    }
}
