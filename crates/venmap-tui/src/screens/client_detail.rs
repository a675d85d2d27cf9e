//! Client detail screen — a single client's profile and branding notes.

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tokio::sync::mpsc::UnboundedSender;

use venmap_core::{Client, ClientId};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct ClientDetailScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    clients: Arc<Vec<Arc<Client>>>,
    viewing: Option<ClientId>,
}

impl ClientDetailScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            clients: Arc::new(Vec::new()),
            viewing: None,
        }
    }

    fn client(&self) -> Option<&Arc<Client>> {
        let id = self.viewing?;
        self.clients.iter().find(|c| c.id == id)
    }

    fn field_line(label: &str, value: Option<&str>) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("  {label:<16}"),
                Style::default().fg(theme::DIM_WHITE),
            ),
            Span::styled(
                value.unwrap_or("—").to_string(),
                Style::default().fg(theme::SOFT_TEAL),
            ),
        ])
    }
}

impl Component for ClientDetailScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ClientsUpdated(clients) => {
                self.clients = clients.clone();
            }
            Action::OpenClient(id) => {
                self.viewing = Some(*id);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        let title = self
            .client()
            .map_or_else(|| " Client ".to_string(), |c| format!(" {} ", c.name));

        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(layout[0]);
        frame.render_widget(block, layout[0]);

        if let Some(client) = self.client() {
            let requirements = client.requirement_keys().join(", ");
            let lines = vec![
                Line::from(""),
                Self::field_line("Industry", client.industry.as_deref()),
                Self::field_line("Website", client.website.as_deref()),
                Self::field_line("Brand tone", client.brand_tone.as_deref()),
                Self::field_line(
                    "Preferences",
                    client.description_preferences.as_deref(),
                ),
                Self::field_line(
                    "Requirements",
                    if requirements.is_empty() {
                        None
                    } else {
                        Some(&requirements)
                    },
                ),
                Self::field_line("Notes", client.notes.as_deref()),
            ];
            frame.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: false }),
                inner,
            );
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled("  Client not loaded", theme::key_hint())),
                inner,
            );
        }

        let hints = Line::from(vec![
            Span::styled("  Esc ", theme::key_hint_key()),
            Span::styled("back  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn handle_key_event(
        &mut self,
        key: crossterm::event::KeyEvent,
    ) -> Result<Option<Action>> {
        if key.code == crossterm::event::KeyCode::Char('r') {
            return Ok(Some(Action::Reload));
        }
        Ok(None)
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn id(&self) -> &str {
        "client-detail"
    }
}
