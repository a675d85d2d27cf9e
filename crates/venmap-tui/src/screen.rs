//! Screen identifier enum and tab-bar ordering.

use std::fmt;

/// Identifies each primary TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Projects, // 1
    Venues,  // 2
    Clients, // 3
    /// Project workspace — opened from the project list, not in the tab bar.
    ProjectDetail,
    /// Client profile — opened from the client list, not in the tab bar.
    ClientDetail,
    /// Login form — shown until a session exists, not in the tab bar.
    Login,
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Projects, Self::Venues, Self::Clients];

    /// Numeric key (1-3) for this screen. Detail and login screens have none.
    pub fn number(self) -> u8 {
        match self {
            Self::Projects => 1,
            Self::Venues => 2,
            Self::Clients => 3,
            Self::ProjectDetail | Self::ClientDetail | Self::Login => 0,
        }
    }

    /// Screen from a numeric key (1-3). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Projects),
            2 => Some(Self::Venues),
            3 => Some(Self::Clients),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Venues => "Venues",
            Self::Clients => "Clients",
            Self::ProjectDetail => "Project",
            Self::ClientDetail => "Client",
            Self::Login => "Login",
        }
    }

    /// Whether this screen lives in a project context: its data loads
    /// relative to the active project rather than the global caches.
    pub fn is_project_scoped(self) -> bool {
        matches!(self, Self::ProjectDetail)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycle_wraps_both_ways() {
        assert_eq!(ScreenId::Projects.next(), ScreenId::Venues);
        assert_eq!(ScreenId::Clients.next(), ScreenId::Projects);
        assert_eq!(ScreenId::Projects.prev(), ScreenId::Clients);
    }

    #[test]
    fn number_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(4), None);
    }

    #[test]
    fn detail_screens_have_no_number_key() {
        assert_eq!(ScreenId::ProjectDetail.number(), 0);
        assert_eq!(ScreenId::Login.number(), 0);
    }
}
