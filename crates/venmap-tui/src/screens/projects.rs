//! Projects screen — the landing list of sourcing projects.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;

use venmap_core::{Project, ProjectStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct ProjectsScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    projects: Arc<Vec<Arc<Project>>>,
    table_state: TableState,
}

impl ProjectsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            projects: Arc::new(Vec::new()),
            table_state: TableState::default(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.projects.len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.projects.len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    fn selected_project(&self) -> Option<&Arc<Project>> {
        self.projects.get(self.selected_index())
    }

    fn status_color(status: ProjectStatus) -> ratatui::style::Color {
        match status {
            ProjectStatus::Active => theme::SUCCESS_GREEN,
            ProjectStatus::Completed => theme::SKY_BLUE,
            ProjectStatus::Cancelled => theme::BORDER_GRAY,
        }
    }
}

impl Component for ProjectsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                let len = self.projects.len();
                if len > 0 {
                    self.select(len - 1);
                }
                Ok(None)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                Ok(None)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                Ok(None)
            }
            KeyCode::Enter => Ok(self
                .selected_project()
                .map(|p| Action::OpenProject(p.id))),
            KeyCode::Char('d') => Ok(self
                .selected_project()
                .map(|p| Action::RequestDeleteProject(p.id))),
            KeyCode::Char('r') => Ok(Some(Action::Reload)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ProjectsUpdated(projects) = action {
            self.projects = projects.clone();
            // Keep the cursor on a valid row after refresh
            self.select(self.selected_index());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        let block = Block::default()
            .title(format!(" Projects ({}) ", self.projects.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let header = Row::new(vec!["Event", "Client", "Dates", "Attendees", "Status", "Venues"])
            .style(theme::table_header());

        let rows: Vec<Row> = self
            .projects
            .iter()
            .map(|p| {
                Row::new(vec![
                    Cell::from(p.event_name.clone()),
                    Cell::from(p.client_name.clone()),
                    Cell::from(p.date_range()),
                    Cell::from(p.attendee_count.to_string()),
                    Cell::from(Span::styled(
                        p.status.to_string(),
                        Style::default().fg(Self::status_color(p.status)),
                    )),
                    Cell::from(p.venue_count.to_string()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(24),
                Constraint::Length(20),
                Constraint::Length(24),
                Constraint::Length(9),
                Constraint::Length(10),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, layout[0], &mut state);

        let hints = Line::from(vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("open  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("move", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn id(&self) -> &str {
        "projects"
    }
}
