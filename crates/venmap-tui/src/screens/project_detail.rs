//! Project detail screen — the working surface for a single project.
//!
//! Three sub-tabs: Venues (the attached shortlist), Outreach (status and
//! quoted terms per venue), and Documents (proposal preview/PDF export).

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;

use venmap_core::{Project, ProjectId, VenueLink};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::status_badge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DetailTab {
    #[default]
    Venues,
    Outreach,
    Documents,
}

impl DetailTab {
    const ALL: [DetailTab; 3] = [Self::Venues, Self::Outreach, Self::Documents];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

pub struct ProjectDetailScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    projects: Arc<Vec<Arc<Project>>>,
    links: Arc<Vec<Arc<VenueLink>>>,
    active_project: Option<ProjectId>,
    /// Links belonging to the active project, in cache order.
    cached_links: Vec<Arc<VenueLink>>,
    tab: DetailTab,
    table_state: TableState,
}

impl ProjectDetailScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            projects: Arc::new(Vec::new()),
            links: Arc::new(Vec::new()),
            active_project: None,
            cached_links: Vec::new(),
            tab: DetailTab::default(),
            table_state: TableState::default(),
        }
    }

    fn recompute_links(&mut self) {
        self.cached_links = match self.active_project {
            Some(id) => self
                .links
                .iter()
                .filter(|l| l.project_id == id)
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        self.select(self.selected_index());
    }

    fn project(&self) -> Option<&Arc<Project>> {
        let id = self.active_project?;
        self.projects.iter().find(|p| p.id == id)
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.cached_links.len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.cached_links.len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    fn selected_link(&self) -> Option<&Arc<VenueLink>> {
        self.cached_links.get(self.selected_index())
    }

    fn included_count(&self) -> usize {
        self.cached_links
            .iter()
            .filter(|l| l.include_in_proposal)
            .count()
    }

    fn eur(amount: f64) -> String {
        format!("€{amount:.2}")
    }

    // ── Tab renderers ───────────────────────────────────────────────

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let Some(project) = self.project() else {
            frame.render_widget(
                Paragraph::new(Span::styled("  No project selected", theme::key_hint())),
                area,
            );
            return;
        };

        let budget = project
            .budget
            .map_or_else(|| "—".into(), Self::eur);
        let line = Line::from(vec![
            Span::styled(
                format!("  {} ", project.event_name),
                theme::title_style(),
            ),
            Span::styled(
                format!(
                    "· {} · {} · {} attendees · budget {} · ",
                    project.client_name,
                    project.date_range(),
                    project.attendee_count,
                    budget,
                ),
                Style::default().fg(theme::DIM_WHITE),
            ),
            Span::styled(
                project.status.to_string(),
                Style::default().fg(theme::SKY_BLUE),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_sub_tabs(&self, frame: &mut Frame, area: Rect) {
        let labels = ["Venues", "Outreach", "Documents"];
        let active = self.tab.index();
        let mut spans = Vec::with_capacity(labels.len() * 2);
        for (i, label) in labels.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", theme::key_hint()));
            }
            if i == active {
                spans.push(Span::styled(format!("[{label}]"), theme::tab_active()));
            } else {
                spans.push(Span::styled(*label, theme::tab_inactive()));
            }
        }
        spans.push(Span::styled("   (t to cycle)", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_venues_tab(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec!["Status", "Venue", "City", "Capacity", "Price", "In proposal"])
            .style(theme::table_header());

        let rows: Vec<Row> = self
            .cached_links
            .iter()
            .map(|l| {
                let price = l.quoted_price.map_or_else(|| "—".into(), Self::eur);
                let include = if l.include_in_proposal {
                    Span::styled("✓", Style::default().fg(theme::SUCCESS_GREEN))
                } else {
                    Span::raw(" ")
                };
                Row::new(vec![
                    Cell::from(status_badge::outreach_badge(l.outreach_status)),
                    Cell::from(l.venue.name.clone()),
                    Cell::from(l.venue.city.clone()),
                    Cell::from(l.venue.capacity.to_string()),
                    Cell::from(price),
                    Cell::from(include),
                ])
                .style(theme::table_row())
            })
            .collect();

        let block = Block::default()
            .title(format!(" Shortlist ({}) ", self.cached_links.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(11),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_outreach_tab(&self, frame: &mut Frame, area: Rect) {
        let layout =
            Layout::vertical([Constraint::Min(4), Constraint::Length(8)]).split(area);

        self.render_venues_tab(frame, layout[0]);

        // Detail pane for the selected association
        let block = Block::default()
            .title(" Outreach detail ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(layout[1]);
        frame.render_widget(block, layout[1]);

        let Some(link) = self.selected_link() else {
            return;
        };

        let dash = |s: Option<&str>| s.unwrap_or("—").to_string();
        let description = link
            .resolved_description()
            .map_or_else(|| "—".into(), |(source, text)| {
                format!("[{source:?}] {text}")
            });
        let lines = vec![
            Line::from(vec![
                Span::styled("  Availability  ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    dash(link.availability_dates.as_deref()),
                    Style::default().fg(theme::SOFT_TEAL),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Rooms         ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    dash(link.room_allocation.as_deref()),
                    Style::default().fg(theme::SOFT_TEAL),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Catering      ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    dash(link.catering_description.as_deref()),
                    Style::default().fg(theme::SOFT_TEAL),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Pros          ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    dash(link.pros.as_deref()),
                    Style::default().fg(theme::SUCCESS_GREEN),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Cons          ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    dash(link.cons.as_deref()),
                    Style::default().fg(theme::WARM_ROSE),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Description   ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(description, Style::default().fg(theme::DIM_WHITE)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_documents_tab(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Proposal ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let included = self.included_count();
        let total = self.cached_links.len();
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Included venues  ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    format!("{included} of {total}"),
                    Style::default().fg(theme::SOFT_TEAL),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  p ", theme::key_hint_key()),
                Span::styled(
                    "write HTML preview to ./proposal.html",
                    theme::key_hint(),
                ),
            ]),
            Line::from(vec![
                Span::styled("  P ", theme::key_hint_key()),
                Span::styled("write PDF to ./proposal.pdf", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Venues without a resolved description fall back to their template.",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn hints(&self) -> Line<'static> {
        match self.tab {
            DetailTab::Venues => Line::from(vec![
                Span::styled("  s ", theme::key_hint_key()),
                Span::styled("advance status  ", theme::key_hint()),
                Span::styled("i ", theme::key_hint_key()),
                Span::styled("toggle include  ", theme::key_hint()),
                Span::styled("e ", theme::key_hint_key()),
                Span::styled("generate description  ", theme::key_hint()),
                Span::styled("x ", theme::key_hint_key()),
                Span::styled("detach  ", theme::key_hint()),
                Span::styled("v ", theme::key_hint_key()),
                Span::styled("gallery  ", theme::key_hint()),
                Span::styled("t ", theme::key_hint_key()),
                Span::styled("tab", theme::key_hint()),
            ]),
            DetailTab::Outreach => Line::from(vec![
                Span::styled("  s ", theme::key_hint_key()),
                Span::styled("advance status  ", theme::key_hint()),
                Span::styled("j/k ", theme::key_hint_key()),
                Span::styled("move  ", theme::key_hint()),
                Span::styled("t ", theme::key_hint_key()),
                Span::styled("tab", theme::key_hint()),
            ]),
            DetailTab::Documents => Line::from(vec![
                Span::styled("  p ", theme::key_hint_key()),
                Span::styled("preview  ", theme::key_hint()),
                Span::styled("P ", theme::key_hint_key()),
                Span::styled("pdf  ", theme::key_hint()),
                Span::styled("t ", theme::key_hint_key()),
                Span::styled("tab", theme::key_hint()),
            ]),
        }
    }
}

impl Component for ProjectDetailScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Tab cycling and navigation work on every sub-tab
        match key.code {
            KeyCode::Char('t') => {
                self.tab = self.tab.next();
                return Ok(None);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                return Ok(None);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                return Ok(None);
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                return Ok(None);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                return Ok(None);
            }
            KeyCode::Char('r') => return Ok(Some(Action::Reload)),
            _ => {}
        }

        match self.tab {
            DetailTab::Venues | DetailTab::Outreach => match key.code {
                KeyCode::Char('s') => Ok(self
                    .selected_link()
                    .map(|l| Action::AdvanceOutreach(l.id))),
                KeyCode::Char('i') => Ok(self
                    .selected_link()
                    .map(|l| Action::ToggleIncludeInProposal(l.id))),
                KeyCode::Char('e') => Ok(self
                    .selected_link()
                    .map(|l| Action::GenerateDescription(l.id))),
                KeyCode::Char('x') => Ok(self
                    .selected_link()
                    .map(|l| Action::RequestDetachVenue(l.id))),
                KeyCode::Char('v') => Ok(Some(Action::OpenGalleryForProject)),
                _ => Ok(None),
            },
            DetailTab::Documents => match key.code {
                KeyCode::Char('p') => Ok(Some(Action::ProposalPreview)),
                KeyCode::Char('P') => Ok(Some(Action::ProposalPdf)),
                _ => Ok(None),
            },
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LinksUpdated(links) => {
                self.links = links.clone();
                self.recompute_links();
            }
            Action::ProjectsUpdated(projects) => {
                self.projects = projects.clone();
            }
            Action::ActiveProjectChanged(id) => {
                self.active_project = *id;
                self.tab = DetailTab::default();
                self.table_state.select(Some(0));
                self.recompute_links();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1), // project header
            Constraint::Length(1), // sub-tabs
            Constraint::Min(1),    // tab content
            Constraint::Length(1), // hints
        ])
        .split(area);

        self.render_header(frame, layout[0]);
        self.render_sub_tabs(frame, layout[1]);

        match self.tab {
            DetailTab::Venues => self.render_venues_tab(frame, layout[2]),
            DetailTab::Outreach => self.render_outreach_tab(frame, layout[2]),
            DetailTab::Documents => self.render_documents_tab(frame, layout[2]),
        }

        frame.render_widget(Paragraph::new(self.hints()), layout[3]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn id(&self) -> &str {
        "project-detail"
    }
}
