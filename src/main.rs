use simplelog::{
    ColorChoice, CombinedLogger, Config as LogConfig, LevelFilter, TermLogger, TerminalMode,
    WriteLogger,
};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use undoquit::config::Config;
use undoquit::editor::Editor;
use undoquit::layout;
use undoquit::tabline::Tabline;
use undoquit::{UndoStack, Undoquit};

const SCREEN_WIDTH: usize = 60;
const SCREEN_HEIGHT: usize = 12;

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Edit(String),
    Split(String),
    TabNew(String),
    Quit,
    Only,
    TabOnly,
    Window(usize),
    Tab(usize),
    TabFirst,
    TabLast,
    Undoquit,
    History,
    Clear,
    Layout,
    Exit,
}

fn parse_action(cmd: &str) -> Option<Action> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }

    let rest = parts[1..].join(" ");
    match parts[0] {
        "Edit" => Some(Action::Edit(rest)),
        "Split" => Some(Action::Split(rest)),
        "TabNew" => Some(Action::TabNew(rest)),
        "Quit" => Some(Action::Quit),
        "Only" => Some(Action::Only),
        "TabOnly" => Some(Action::TabOnly),
        "Window" => parts
            .get(1)
            .and_then(|s| s.parse().ok())
            .map(Action::Window),
        "Tab" => parts.get(1).and_then(|s| s.parse().ok()).map(Action::Tab),
        "TabFirst" => Some(Action::TabFirst),
        "TabLast" => Some(Action::TabLast),
        "Undoquit" => Some(Action::Undoquit),
        "History" => Some(Action::History),
        "Clear" => Some(Action::Clear),
        "Layout" => Some(Action::Layout),
        "Exit" => Some(Action::Exit),
        _ => {
            log::warn!("Unknown action: {}", cmd);
            None
        }
    }
}

/// Expand an alias. A whole-line match wins; otherwise the first word is
/// looked up and the remaining words are passed along as arguments.
fn resolve_line(line: &str, bindings: &HashMap<String, String>) -> Option<Action> {
    let line = line.trim();
    if let Some(action) = bindings.get(line) {
        return parse_action(action);
    }

    match line.split_once(char::is_whitespace) {
        Some((head, args)) => match bindings.get(head) {
            Some(action) => parse_action(&format!("{} {}", action, args.trim())),
            None => parse_action(line),
        },
        None => parse_action(line),
    }
}

fn draw(editor: &Editor, out: &mut impl Write) -> io::Result<()> {
    let tabline = Tabline::new(SCREEN_WIDTH);
    writeln!(out, "{}", tabline.draw(editor.tabs(), editor.active_tab()))?;
    for row in layout::tile_windows(editor.tab(), SCREEN_WIDTH, SCREEN_HEIGHT) {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = Config::path();
    let loaded = Config::load_from(&config_path);
    let log_config = loaded.as_ref().map(|c| c.log.clone()).unwrap_or_default();

    let level = LevelFilter::from_str(&log_config.level).unwrap_or(LevelFilter::Info);
    CombinedLogger::init(vec![
        TermLogger::new(
            level,
            LogConfig::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level, LogConfig::default(), File::create(&log_config.file)?),
    ])?;

    let config = Config::report(&config_path, loaded);

    let bindings = config.bindings.clone();
    let mut undoquit = Undoquit::new(UndoStack::with_capacity_limit(config.history.max_entries));
    let mut editor = Editor::new("");

    log::info!(
        "UNDOQUIT STARTED with {} bindings, logging to {:?}",
        bindings.len(),
        config.log.file
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    draw(&editor, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(action) = resolve_line(&line, &bindings) else {
            continue;
        };
        log::debug!("Executing: {:?}", action);

        let result = match &action {
            Action::Edit(path) => {
                editor.edit(path);
                Ok(())
            }
            Action::Split(path) => {
                editor.split(path);
                Ok(())
            }
            Action::TabNew(path) => {
                editor.tabnew(path);
                Ok(())
            }
            Action::Quit => editor.quit(&mut undoquit),
            Action::Only => {
                editor.only(&mut undoquit);
                Ok(())
            }
            Action::TabOnly => {
                editor.tabonly(&mut undoquit);
                Ok(())
            }
            Action::Window(n) => editor.focus_window(*n),
            Action::Tab(n) => editor.focus_tab(*n),
            Action::TabFirst => {
                editor.tab_first();
                Ok(())
            }
            Action::TabLast => {
                editor.tab_last();
                Ok(())
            }
            Action::Undoquit => match undoquit.undo_quit(&mut editor) {
                Ok(Some(_)) => Ok(()),
                Ok(None) => {
                    writeln!(out, "Nothing to undo")?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Action::History => {
                for (i, snapshot) in undoquit.history().enumerate() {
                    writeln!(
                        out,
                        "{:>3}  {:<6} {:<24} {}/{}  {}",
                        i + 1,
                        snapshot.kind(),
                        snapshot.content_id(),
                        snapshot.position(),
                        snapshot.sibling_count_at_close(),
                        snapshot.closed_at().format("%H:%M:%S")
                    )?;
                }
                continue;
            }
            Action::Clear => {
                let dropped = undoquit.clear();
                writeln!(out, "Forgot {} closed views", dropped)?;
                continue;
            }
            Action::Layout => Ok(()),
            Action::Exit => break,
        };

        match result {
            Ok(()) => draw(&editor, &mut out)?,
            Err(e) => writeln!(out, "E: {}", e)?,
        }
    }

    log::info!("UNDOQUIT EXITING");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_with_arguments() {
        assert_eq!(parse_action("Edit one.txt"), Some(Action::Edit("one.txt".into())));
        assert_eq!(parse_action("Window 3"), Some(Action::Window(3)));
        assert_eq!(parse_action("Tab x"), None);
        assert_eq!(parse_action("Frobnicate"), None);
        assert_eq!(parse_action("   "), None);
    }

    #[test]
    fn aliases_expand_with_arguments() {
        let bindings = Config::default().bindings;
        assert_eq!(resolve_line("<c-w>u", &bindings), Some(Action::Undoquit));
        assert_eq!(resolve_line("3wincmd w", &bindings), Some(Action::Window(3)));
        assert_eq!(
            resolve_line(":tabnew two.txt", &bindings),
            Some(Action::TabNew("two.txt".into()))
        );
        assert_eq!(
            resolve_line("Split three.txt", &bindings),
            Some(Action::Split("three.txt".into()))
        );
    }
}
