// ── View router ──
//
// A navigation target plus the current context produce a transition
// plan: the fetches to run, and what happens to the active-project
// pointer. Planning is pure so the routing rules are testable without
// a backend; the session executes the plan.

use crate::model::{ClientId, ProjectId};

/// The six navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Projects,
    Venues,
    ProjectDetails(ProjectId),
    ProjectVenues(ProjectId),
    Clients,
    ClientDetails(ClientId),
}

impl Default for View {
    fn default() -> Self {
        Self::Projects
    }
}

impl View {
    /// The create affordance is only offered on the project list.
    pub fn shows_create_action(self) -> bool {
        matches!(self, Self::Projects)
    }
}

/// One cache-refreshing fetch a transition needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Projects,
    Project(ProjectId),
    ProjectVenues(ProjectId),
    Venues,
    Clients,
    Client(ClientId),
}

/// What a transition does to the active-project pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveProjectEffect {
    /// Project-independent view: drop the pointer.
    Clear,
    /// Pointer survives as the caller passed it in.
    Keep,
    Set(ProjectId),
}

/// The full recipe for one view transition.
///
/// Fetches are independent and run concurrently; a failed fetch leaves
/// the previous cache in place. The selection sets are cleared on
/// every transition, so the plan does not mention them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    pub view: View,
    pub active_project: ActiveProjectEffect,
    pub fetches: Vec<FetchKind>,
}

/// Plan a transition to `target`.
///
/// `active` is the current active-project pointer. Top-level
/// navigation must clear it before planning; only in-view links that
/// carry a project context pass it through. `have_projects` reports
/// whether the project cache is already populated.
pub fn plan_transition(
    target: View,
    active: Option<ProjectId>,
    have_projects: bool,
) -> TransitionPlan {
    match target {
        View::Projects => TransitionPlan {
            view: target,
            active_project: ActiveProjectEffect::Clear,
            fetches: vec![FetchKind::Projects],
        },

        View::Venues => {
            let mut fetches = vec![FetchKind::Venues];
            // With a project context the gallery also needs that
            // project's associations, to mark already-attached venues.
            if let Some(project_id) = active {
                fetches.push(FetchKind::ProjectVenues(project_id));
            }
            TransitionPlan {
                view: target,
                active_project: ActiveProjectEffect::Keep,
                fetches,
            }
        }

        View::ProjectDetails(project_id) => {
            let mut fetches = Vec::new();
            if !have_projects {
                fetches.push(FetchKind::Projects);
            }
            fetches.push(FetchKind::ProjectVenues(project_id));
            TransitionPlan {
                view: target,
                active_project: ActiveProjectEffect::Set(project_id),
                fetches,
            }
        }

        View::ProjectVenues(project_id) => TransitionPlan {
            view: target,
            active_project: ActiveProjectEffect::Set(project_id),
            fetches: vec![
                FetchKind::Project(project_id),
                FetchKind::ProjectVenues(project_id),
            ],
        },

        View::Clients => TransitionPlan {
            view: target,
            active_project: ActiveProjectEffect::Keep,
            fetches: vec![FetchKind::Clients],
        },

        View::ClientDetails(client_id) => TransitionPlan {
            view: target,
            active_project: ActiveProjectEffect::Keep,
            fetches: vec![FetchKind::Client(client_id)],
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn pid() -> ProjectId {
        ProjectId(Uuid::new_v4())
    }

    #[test]
    fn projects_clears_active_and_fetches_list() {
        let plan = plan_transition(View::Projects, Some(pid()), true);
        assert_eq!(plan.active_project, ActiveProjectEffect::Clear);
        assert_eq!(plan.fetches, vec![FetchKind::Projects]);
    }

    #[test]
    fn venues_without_context_fetches_gallery_only() {
        let plan = plan_transition(View::Venues, None, true);
        assert_eq!(plan.active_project, ActiveProjectEffect::Keep);
        assert_eq!(plan.fetches, vec![FetchKind::Venues]);
    }

    #[test]
    fn venues_with_context_also_fetches_associations() {
        let project_id = pid();
        let plan = plan_transition(View::Venues, Some(project_id), true);
        assert_eq!(
            plan.fetches,
            vec![FetchKind::Venues, FetchKind::ProjectVenues(project_id)]
        );
    }

    #[test]
    fn project_details_sets_active() {
        let project_id = pid();
        let plan = plan_transition(View::ProjectDetails(project_id), None, true);
        assert_eq!(plan.active_project, ActiveProjectEffect::Set(project_id));
        assert_eq!(plan.fetches, vec![FetchKind::ProjectVenues(project_id)]);
    }

    #[test]
    fn project_details_backfills_empty_project_cache() {
        let project_id = pid();
        let plan = plan_transition(View::ProjectDetails(project_id), None, false);
        assert_eq!(
            plan.fetches,
            vec![FetchKind::Projects, FetchKind::ProjectVenues(project_id)]
        );
    }

    #[test]
    fn project_venues_refreshes_project_and_associations() {
        let project_id = pid();
        let plan = plan_transition(View::ProjectVenues(project_id), Some(pid()), true);
        assert_eq!(plan.active_project, ActiveProjectEffect::Set(project_id));
        assert_eq!(
            plan.fetches,
            vec![
                FetchKind::Project(project_id),
                FetchKind::ProjectVenues(project_id)
            ]
        );
    }

    #[test]
    fn clients_leaves_active_alone() {
        let plan = plan_transition(View::Clients, Some(pid()), true);
        assert_eq!(plan.active_project, ActiveProjectEffect::Keep);
        assert_eq!(plan.fetches, vec![FetchKind::Clients]);
    }

    #[test]
    fn create_action_only_on_project_list() {
        assert!(View::Projects.shows_create_action());
        assert!(!View::Venues.shows_create_action());
        assert!(!View::Clients.shows_create_action());
    }
}
