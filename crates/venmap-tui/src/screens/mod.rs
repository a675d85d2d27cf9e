//! Screen implementations. Each screen is a top-level Component.

pub mod client_detail;
pub mod clients;
pub mod login;
pub mod project_detail;
pub mod projects;
pub mod venues;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create the screen components present for a connected session.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Projects,
            Box::new(projects::ProjectsScreen::new()),
        ),
        (ScreenId::Venues, Box::new(venues::VenuesScreen::new())),
        (ScreenId::Clients, Box::new(clients::ClientsScreen::new())),
        (
            ScreenId::ProjectDetail,
            Box::new(project_detail::ProjectDetailScreen::new()),
        ),
        (
            ScreenId::ClientDetail,
            Box::new(client_detail::ClientDetailScreen::new()),
        ),
    ]
}
