//! Small reusable render helpers shared across screens.

pub mod action_bar;
pub mod status_badge;
