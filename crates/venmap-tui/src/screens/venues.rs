//! Venue gallery screen — browse, filter, and multi-select venues.
//!
//! Runs in two modes: global (no active project) and project mode, where
//! the selection can be attached to the active project in bulk.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use venmap_core::{GalleryFilter, Project, ProjectId, SelectionSet, Venue, VenueId, VenueLink};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::action_bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterField {
    City,
    MinCapacity,
}

pub struct VenuesScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    venues: Arc<Vec<Arc<Venue>>>,
    projects: Arc<Vec<Arc<Project>>>,
    links: Arc<Vec<Arc<VenueLink>>>,
    selection: SelectionSet<VenueId>,
    active_project: Option<ProjectId>,
    table_state: TableState,
    // Filter editing overlay
    filter_editing: bool,
    filter_field: FilterField,
    city_input: Input,
    capacity_input: Input,
    applied_filter: GalleryFilter,
}

impl VenuesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            action_tx: None,
            venues: Arc::new(Vec::new()),
            projects: Arc::new(Vec::new()),
            links: Arc::new(Vec::new()),
            selection: SelectionSet::new(),
            active_project: None,
            table_state: TableState::default(),
            filter_editing: false,
            filter_field: FilterField::City,
            city_input: Input::default(),
            capacity_input: Input::default(),
            applied_filter: GalleryFilter::default(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.venues.len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.venues.len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    fn selected_venue(&self) -> Option<&Arc<Venue>> {
        self.venues.get(self.selected_index())
    }

    /// Whether the venue is already attached to the active project.
    /// Attached venues are shown marked and cannot be selected again.
    fn is_attached(&self, venue_id: VenueId) -> bool {
        self.active_project.is_some_and(|pid| {
            self.links
                .iter()
                .any(|l| l.project_id == pid && l.venue_id == venue_id)
        })
    }

    fn active_project_name(&self) -> Option<String> {
        let id = self.active_project?;
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.event_name.clone())
    }

    /// Build the filter from the edit inputs. A non-numeric capacity is
    /// treated as unset.
    fn filter_from_inputs(&self) -> GalleryFilter {
        let city = {
            let v = self.city_input.value().trim();
            if v.is_empty() { None } else { Some(v.to_string()) }
        };
        let min_capacity = self.capacity_input.value().trim().parse::<u32>().ok();
        GalleryFilter {
            city,
            min_capacity,
            facilities: Vec::new(),
            event_types: Vec::new(),
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.filter_editing = false;
                None
            }
            KeyCode::Tab => {
                self.filter_field = match self.filter_field {
                    FilterField::City => FilterField::MinCapacity,
                    FilterField::MinCapacity => FilterField::City,
                };
                None
            }
            KeyCode::Enter => {
                self.filter_editing = false;
                let filter = self.filter_from_inputs();
                self.applied_filter = filter.clone();
                Some(Action::ApplyGalleryFilter(filter))
            }
            _ => {
                let input = match self.filter_field {
                    FilterField::City => &mut self.city_input,
                    FilterField::MinCapacity => &mut self.capacity_input,
                };
                input.handle_event(&CrosstermEvent::Key(key));
                None
            }
        }
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let city_active = self.filter_field == FilterField::City;
        let field_style = |active: bool| {
            if active {
                Style::default().fg(theme::SOFT_TEAL)
            } else {
                Style::default().fg(theme::DIM_WHITE)
            }
        };
        let cursor = |active: bool| if active { "\u{2588}" } else { "" };

        let line = Line::from(vec![
            Span::styled(" Filter  ", theme::title_style()),
            Span::styled("City: ", theme::key_hint()),
            Span::styled(
                format!("{}{}", self.city_input.value(), cursor(city_active)),
                field_style(city_active),
            ),
            Span::styled("   Min capacity: ", theme::key_hint()),
            Span::styled(
                format!("{}{}", self.capacity_input.value(), cursor(!city_active)),
                field_style(!city_active),
            ),
            Span::styled("   Tab field  Enter apply  Esc cancel", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn filter_summary(&self) -> Option<String> {
        if self.applied_filter.is_empty() {
            return None;
        }
        let mut parts = Vec::new();
        if let Some(ref city) = self.applied_filter.city {
            parts.push(format!("city={city}"));
        }
        if let Some(cap) = self.applied_filter.min_capacity {
            parts.push(format!("cap≥{cap}"));
        }
        Some(parts.join(", "))
    }
}

impl Component for VenuesScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.filter_editing {
            return Ok(self.handle_filter_key(key));
        }

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
                let len = self.venues.len();
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
            KeyCode::Char(' ') => Ok(self
                .selected_venue()
                .filter(|v| !self.is_attached(v.id))
                .map(|v| Action::ToggleVenueSelection(v.id))),
            KeyCode::Char('a') => {
                if self.selection.is_empty() {
                    Ok(None)
                } else {
                    // No-active-project handling (warn + redirect) is app-level
                    Ok(Some(Action::AttachSelection))
                }
            }
            KeyCode::Char('f') => {
                self.filter_editing = true;
                Ok(None)
            }
            KeyCode::Char('r') => Ok(Some(Action::Reload)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::VenuesUpdated(venues) => {
                self.venues = venues.clone();
                self.select(self.selected_index());
            }
            Action::ProjectsUpdated(projects) => {
                self.projects = projects.clone();
            }
            Action::LinksUpdated(links) => {
                self.links = links.clone();
            }
            Action::VenueSelectionChanged(selection) => {
                self.selection = selection.clone();
            }
            Action::ActiveProjectChanged(id) => {
                self.active_project = *id;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        let mut title = match self.active_project_name() {
            Some(name) => format!(" Venue Gallery — adding to {name} "),
            None => format!(" Venue Gallery ({}) ", self.venues.len()),
        };
        if let Some(summary) = self.filter_summary() {
            title.push_str(&format!("[{summary}] "));
        }

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

        let header = Row::new(vec!["", "Name", "City", "Capacity", "Facilities", "Photos"])
            .style(theme::table_header());

        let rows: Vec<Row> = self
            .venues
            .iter()
            .map(|v| {
                let attached = self.is_attached(v.id);
                let mark = if attached {
                    Span::styled("●", Style::default().fg(theme::BORDER_GRAY))
                } else if self.selection.contains(v.id) {
                    Span::styled("✓", Style::default().fg(theme::BRAND_GOLD))
                } else {
                    Span::raw(" ")
                };
                Row::new(vec![
                    Cell::from(mark),
                    Cell::from(v.name.clone()),
                    Cell::from(v.city.clone()),
                    Cell::from(v.capacity.to_string()),
                    Cell::from(v.facilities_label()),
                    Cell::from(v.photos.len().to_string()),
                ])
                .style(if attached {
                    Style::default().fg(theme::BORDER_GRAY)
                } else {
                    theme::table_row()
                })
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(1),
                Constraint::Min(22),
                Constraint::Length(16),
                Constraint::Length(8),
                Constraint::Min(18),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("▸ ");

        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, layout[0], &mut state);

        // Bottom row: filter editor > selection bar > hints, in that order
        if self.filter_editing {
            self.render_filter_bar(frame, layout[1]);
        } else if self.selection.is_empty() {
            let hints = Line::from(vec![
                Span::styled("  Space ", theme::key_hint_key()),
                Span::styled("select  ", theme::key_hint()),
                Span::styled("f ", theme::key_hint_key()),
                Span::styled("filter  ", theme::key_hint()),
                Span::styled("r ", theme::key_hint_key()),
                Span::styled("reload  ", theme::key_hint()),
                Span::styled("j/k ", theme::key_hint_key()),
                Span::styled("move", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(hints), layout[1]);
        } else {
            frame.render_widget(
                Paragraph::new(action_bar::selection_bar(
                    self.selection.len(),
                    self.active_project.is_some(),
                )),
                layout[1],
            );
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn capturing_input(&self) -> bool {
        self.filter_editing
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn id(&self) -> &str {
        "venues"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use venmap_core::{LinkId, OutreachStatus};

    fn venue(name: &str) -> Venue {
        let now = Utc::now();
        Venue {
            id: VenueId(Uuid::new_v4()),
            name: name.into(),
            city: "Brussels".into(),
            capacity: 120,
            facilities: vec![],
            event_types: vec![],
            contact_email: None,
            contact_phone: None,
            website: None,
            address: None,
            description_template: None,
            notes: None,
            photos: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn attach(project_id: ProjectId, venue: &Venue) -> VenueLink {
        let now = Utc::now();
        VenueLink {
            id: LinkId(Uuid::new_v4()),
            project_id,
            venue_id: venue.id,
            outreach_status: OutreachStatus::Draft,
            availability_dates: None,
            is_available: None,
            quoted_price: None,
            room_allocation: None,
            catering_description: None,
            pros: None,
            cons: None,
            ai_description: None,
            final_description: None,
            include_in_proposal: false,
            ai_context: None,
            notes: None,
            venue: venue.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn space() -> KeyEvent {
        KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)
    }

    #[test]
    fn attached_venue_cannot_be_selected_in_project_mode() {
        let mut screen = VenuesScreen::new();
        let v = venue("Atomium");
        let pid = ProjectId(Uuid::new_v4());

        screen
            .update(&Action::VenuesUpdated(Arc::new(vec![Arc::new(v.clone())])))
            .unwrap();
        screen
            .update(&Action::ActiveProjectChanged(Some(pid)))
            .unwrap();
        screen
            .update(&Action::LinksUpdated(Arc::new(vec![Arc::new(attach(
                pid, &v,
            ))])))
            .unwrap();

        assert!(screen.is_attached(v.id));
        assert!(screen.handle_key_event(space()).unwrap().is_none());
    }

    #[test]
    fn unattached_venue_toggles_selection() {
        let mut screen = VenuesScreen::new();
        let v = venue("Flagey");
        let pid = ProjectId(Uuid::new_v4());

        screen
            .update(&Action::VenuesUpdated(Arc::new(vec![Arc::new(v.clone())])))
            .unwrap();
        screen
            .update(&Action::ActiveProjectChanged(Some(pid)))
            .unwrap();

        match screen.handle_key_event(space()).unwrap() {
            Some(Action::ToggleVenueSelection(id)) => assert_eq!(id, v.id),
            other => panic!("expected selection toggle, got {other:?}"),
        }
    }

    #[test]
    fn links_do_not_block_selection_in_the_global_gallery() {
        let mut screen = VenuesScreen::new();
        let v = venue("Bozar");
        let other_project = ProjectId(Uuid::new_v4());

        screen
            .update(&Action::VenuesUpdated(Arc::new(vec![Arc::new(v.clone())])))
            .unwrap();
        // Link snapshot from an earlier project view; no active project now.
        screen
            .update(&Action::LinksUpdated(Arc::new(vec![Arc::new(attach(
                other_project,
                &v,
            ))])))
            .unwrap();

        assert!(!screen.is_attached(v.id));
        assert!(matches!(
            screen.handle_key_event(space()).unwrap(),
            Some(Action::ToggleVenueSelection(_))
        ));
    }
}
