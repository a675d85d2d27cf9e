//! Login screen — shown until a session exists.
//!
//! Collects backend URL, email, and password, then test-connects in a
//! background task. On success, emits [`Action::LoginComplete`] with the
//! built [`BackendConfig`] so the app can spawn the data bridge.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use secrecy::SecretString;
use tokio::sync::mpsc::UnboundedSender;

use venmap_core::{AuthCredentials, BackendConfig, TlsVerification, Workspace};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Server,
    Email,
    Password,
}

pub struct LoginScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    server_input: String,
    email_input: String,
    password_input: String,
    active_field: LoginField,
    show_password: bool,
    insecure: bool,
    testing: bool,
    /// Set after a successful test; Enter then hands it to the app.
    verified_config: Option<BackendConfig>,
    error: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl LoginScreen {
    /// `server` and `email` prefill from the config file's default profile;
    /// `insecure` comes from the CLI flag.
    pub fn new(server: Option<String>, email: Option<String>, insecure: bool) -> Self {
        Self {
            focused: false,
            action_tx: None,
            server_input: server.unwrap_or_else(|| "http://localhost:8000".into()),
            email_input: email.unwrap_or_default(),
            password_input: String::new(),
            active_field: LoginField::Email,
            show_password: false,
            insecure,
            testing: false,
            verified_config: None,
            error: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn next_field(&mut self) {
        self.active_field = match self.active_field {
            LoginField::Server => LoginField::Email,
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Server,
        };
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.active_field {
            LoginField::Server => &mut self.server_input,
            LoginField::Email => &mut self.email_input,
            LoginField::Password => &mut self.password_input,
        }
    }

    fn build_config(&self) -> std::result::Result<BackendConfig, String> {
        let url: url::Url = self
            .server_input
            .trim()
            .parse()
            .map_err(|_| "Invalid backend URL".to_string())?;
        if self.email_input.trim().is_empty() {
            return Err("Email cannot be empty".into());
        }
        if self.password_input.is_empty() {
            return Err("Password cannot be empty".into());
        }
        Ok(BackendConfig {
            url,
            auth: AuthCredentials::Credentials {
                email: self.email_input.trim().to_string(),
                password: SecretString::from(self.password_input.clone()),
            },
            tls: if self.insecure {
                TlsVerification::DangerAcceptInvalid
            } else {
                TlsVerification::SystemDefaults
            },
            timeout: std::time::Duration::from_secs(30),
            refresh_interval_secs: 300,
        })
    }

    /// Spawn an async connection test against the entered credentials.
    fn start_login(&mut self) {
        let config = match self.build_config() {
            Ok(config) => config,
            Err(msg) => {
                self.error = Some(msg);
                return;
            }
        };
        let Some(tx) = self.action_tx.clone() else {
            return;
        };

        self.testing = true;
        self.error = None;
        self.verified_config = Some(config.clone());

        tokio::spawn(async move {
            let result = match Workspace::new(config) {
                Ok(workspace) => match workspace.connect().await {
                    Ok(()) => {
                        workspace.disconnect().await;
                        Ok(())
                    }
                    Err(e) => Err(format!("{e}")),
                },
                Err(e) => Err(format!("{e}")),
            };
            let _ = tx.send(Action::LoginTestResult(result));
        });
    }

    fn render_input_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        active: bool,
        masked: bool,
    ) {
        if area.height < 3 {
            return;
        }

        let label_area = Rect::new(area.x, area.y, area.width, 1);
        let label_style = if active {
            Style::default().fg(theme::SOFT_TEAL)
        } else {
            Style::default().fg(theme::DIM_WHITE)
        };
        frame.render_widget(Paragraph::new(Span::styled(label, label_style)), label_area);

        let display = if masked && !value.is_empty() {
            "\u{25CF}".repeat(value.len())
        } else {
            value.to_string()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if active {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let block_area = Rect::new(area.x, area.y + 1, area.width, 3.min(area.height - 1));
        let inner = block.inner(block_area);
        frame.render_widget(block, block_area);

        let text = if active {
            format!("{display}\u{2588}")
        } else {
            display
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(theme::SOFT_TEAL))),
            inner,
        );
    }

    fn render_centered_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        let panel_w = 58u16.min(area.width.saturating_sub(4));
        let panel_h = 21u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(panel_w)) / 2;
        let y = (area.height.saturating_sub(panel_h)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            panel,
        );

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("venmap — sign in", theme::title_style()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        inner
    }
}

impl Component for LoginScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.testing {
            // Only Esc cancels the spinner view; the result action lands soon.
            if key.code == KeyCode::Esc {
                self.testing = false;
            }
            return Ok(None);
        }

        if self.verified_config.is_some() && !self.testing && self.error.is_none() {
            // "Connected" confirmation state
            if key.code == KeyCode::Enter {
                if let Some(config) = self.verified_config.clone() {
                    return Ok(Some(Action::LoginComplete {
                        config: Box::new(config),
                    }));
                }
            }
            if key.code == KeyCode::Esc {
                self.verified_config = None;
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::Enter => self.start_login(),
            KeyCode::Backspace => {
                self.active_input_mut().pop();
            }
            KeyCode::Char(c) => {
                self.error = None;
                // Ctrl+U toggles password visibility
                if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                    self.show_password = !self.show_password;
                } else {
                    self.active_input_mut().push(c);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LoginTestResult(result) => {
                self.testing = false;
                match result {
                    Ok(()) => {
                        // Skip the confirmation screen: hand the config
                        // straight to the app for the real connection.
                        if let Some(config) = self.verified_config.clone() {
                            return Ok(Some(Action::LoginComplete {
                                config: Box::new(config),
                            }));
                        }
                    }
                    Err(msg) => {
                        self.verified_config = None;
                        self.error = Some(msg.clone());
                        self.password_input.clear();
                        self.active_field = LoginField::Password;
                    }
                }
            }
            Action::SessionEnded => {
                self.error = Some("Session expired — please sign in again".into());
                self.password_input.clear();
                self.verified_config = None;
                self.active_field = LoginField::Password;
            }
            Action::Tick => {
                if self.testing {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            area,
        );

        let inner = self.render_centered_panel(frame, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Length(4), // server
            Constraint::Length(4), // email
            Constraint::Length(4), // password
            Constraint::Length(1), // spacer / throbber
            Constraint::Length(2), // error
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_input_field(
            frame,
            layout[1],
            "  Backend URL",
            &self.server_input,
            self.active_field == LoginField::Server,
            false,
        );
        self.render_input_field(
            frame,
            layout[2],
            "  Email",
            &self.email_input,
            self.active_field == LoginField::Email,
            false,
        );
        self.render_input_field(
            frame,
            layout[3],
            "  Password",
            &self.password_input,
            self.active_field == LoginField::Password,
            !self.show_password,
        );

        if self.testing {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("  Signing in...")
                .style(Style::default().fg(theme::SOFT_TEAL))
                .throbber_style(Style::default().fg(theme::BRAND_GOLD));
            frame.render_stateful_widget(throbber, layout[4], &mut self.throbber_state.clone());
        }

        if let Some(ref err) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  {err}"),
                    Style::default()
                        .fg(theme::ERROR_RED)
                        .add_modifier(Modifier::BOLD),
                ))
                .wrap(Wrap { trim: false }),
                layout[5],
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Tab next field  Enter sign in  Ctrl+U show password  Ctrl+C quit",
                theme::key_hint(),
            ))
            .alignment(Alignment::Center),
            layout[7],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn id(&self) -> &str {
        "login"
    }
}
