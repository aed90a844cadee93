//! TUI module using ratatui.
//!
//! Browses extracted snippets: list on the left, code on the right.
//! `j`/`k` or arrows move, `c` copies, `s` saves Markdown, `q` quits.

use crate::clipboard;
use crate::export;
use crate::snippet::{Snippet, SnippetGroup, SnippetRef};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::io;
use std::path::PathBuf;

/// One selectable row
struct Entry<'a> {
    id: SnippetRef,
    group: &'a str,
    snippet: &'a Snippet,
}

/// Browser state
pub struct App<'a> {
    entries: Vec<Entry<'a>>,
    list_state: ListState,
    markdown_path: PathBuf,
    groups: &'a [SnippetGroup],
    status: String,
    quit: bool,
}

impl<'a> App<'a> {
    pub fn new(groups: &'a [SnippetGroup], markdown_path: PathBuf) -> Self {
        let entries: Vec<Entry<'a>> = groups
            .iter()
            .enumerate()
            .flat_map(|(g, group)| {
                group.snippets.iter().enumerate().map(move |(s, snippet)| Entry {
                    id: SnippetRef {
                        group: g + 1,
                        snippet: s + 1,
                    },
                    group: group.group_title.as_str(),
                    snippet,
                })
            })
            .collect();

        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            entries,
            list_state,
            markdown_path,
            groups,
            status: String::from("j/k: move  c: copy  s: save markdown  q: quit"),
            quit: false,
        }
    }

    pub fn selected(&self) -> Option<SnippetRef> {
        self.list_state
            .selected()
            .and_then(|i| self.entries.get(i))
            .map(|entry| entry.id)
    }

    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn copy_selected(&mut self) {
        let Some(entry) = self.list_state.selected().and_then(|i| self.entries.get(i)) else {
            return;
        };
        self.status = match clipboard::copy(entry.snippet) {
            Ok(()) => format!("Copied {}!", entry.id),
            Err(e) => e.to_string(),
        };
    }

    fn save(&mut self) {
        self.status = match export::save(&self.markdown_path, self.groups, true) {
            Ok(()) => format!("Saved to {}", self.markdown_path.display()),
            Err(e) => e.to_string(),
        };
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.previous(),
            KeyCode::Char('c') => self.copy_selected(),
            KeyCode::Char('s') => self.save(),
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
        let [list_area, code_area] =
            Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(body);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", entry.id), Style::new().fg(Color::Yellow)),
                    Span::raw(entry.snippet.title.as_str()),
                    Span::styled(format!("  {}", entry.group), Style::new().fg(Color::DarkGray)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(Block::bordered().title(" Snippets "))
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        let code = match self.list_state.selected().and_then(|i| self.entries.get(i)) {
            Some(entry) => {
                let mut lines = vec![
                    Line::from(entry.snippet.description.as_str()).italic(),
                    Line::default(),
                ];
                lines.extend(entry.snippet.code.lines().map(Line::from));
                Paragraph::new(lines).block(Block::bordered().title(format!(
                    " {} ({}) ",
                    entry.snippet.title,
                    entry.snippet.highlight_language()
                )))
            }
            None => Paragraph::new("No Snippets Found").block(Block::bordered()),
        };
        frame.render_widget(code, code_area);
        frame.render_widget(Line::from(self.status.as_str()).cyan(), status);
    }
}

/// Run the snippet browser until the user quits
pub fn run(groups: &[SnippetGroup], markdown_path: PathBuf) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, App::new(groups, markdown_path));
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut app: App<'_>) -> io::Result<()> {
    while !app.quit {
        terminal.draw(|frame| app.draw(frame))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<SnippetGroup> {
        let snippet = |title: &str| Snippet {
            title: title.into(),
            description: "d".into(),
            language: "rust".into(),
            code: "fn f() {}".into(),
        };
        vec![
            SnippetGroup {
                group_title: "A".into(),
                group_description: String::new(),
                snippets: vec![snippet("a1"), snippet("a2")],
            },
            SnippetGroup {
                group_title: "B".into(),
                group_description: String::new(),
                snippets: vec![snippet("b1")],
            },
        ]
    }

    #[test]
    fn navigation_wraps_across_groups() {
        let groups = groups();
        let mut app = App::new(&groups, PathBuf::from("out.md"));
        assert_eq!(app.selected(), Some(SnippetRef { group: 1, snippet: 1 }));
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('j'));
        assert_eq!(app.selected(), Some(SnippetRef { group: 2, snippet: 1 }));
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected(), Some(SnippetRef { group: 1, snippet: 1 }));
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected(), Some(SnippetRef { group: 2, snippet: 1 }));
    }

    #[test]
    fn empty_results_have_no_selection() {
        let mut app = App::new(&[], PathBuf::from("out.md"));
        app.next();
        assert_eq!(app.selected(), None);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.quit);
    }

    #[test]
    fn save_key_writes_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippets.md");
        let groups = groups();
        let mut app = App::new(&groups, path.clone());
        app.handle_key(KeyCode::Char('s'));
        assert!(app.status.starts_with("Saved to"));
        assert!(std::fs::read_to_string(path).unwrap().contains("### b1"));
    }
}
