#![allow(clippy::unwrap_used)]
// Integration tests for `Workspace` against a mocked backend.
//
// These exercise the full path: login, view transitions with their
// fetch batches, command routing through the processor task, and the
// session-expiry handling.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use venmap_core::{
    AuthCredentials, BackendConfig, Command, CommandResult, ConnectionState, CoreError,
    GalleryFilter, OutreachStatus, ProjectId, UpdateLinkRequest, VenueId, View, Workspace,
};

const PROJECT_ID: &str = "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d";
const VENUE_ID: &str = "7f2e9c1a-4b3d-4e5f-8a6b-1c2d3e4f5a6b";
const LINK_ID: &str = "5e6f7a8b-9c0d-4e1f-8a2b-3c4d5e6f7a8b";
const CLIENT_ID: &str = "9a0b1c2d-3e4f-4a5b-8c6d-7e8f9a0b1c2d";

// ── Fixtures ────────────────────────────────────────────────────────

fn project_id() -> ProjectId {
    PROJECT_ID.parse().unwrap()
}

fn venue_id() -> VenueId {
    VENUE_ID.parse().unwrap()
}

fn venue_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "city": "Berlin",
        "capacity": 350,
        "facilities": ["wifi"],
        "event_types": ["conference"],
        "is_deleted": false,
        "created_at": "2024-06-15T10:30:00Z",
        "updated_at": "2024-06-15T10:30:00Z",
        "photos": []
    })
}

fn project_json(id: &str) -> Value {
    json!({
        "id": id,
        "user_id": "3c4d5e6f-7a8b-4c9d-8e0f-1a2b3c4d5e6f",
        "client_name": "Nordwind GmbH",
        "event_name": "Sales Kickoff",
        "event_date_start": "2025-09-01",
        "event_date_end": "2025-09-03",
        "attendee_count": 120,
        "status": "active",
        "created_at": "2024-06-15T10:30:00Z",
        "updated_at": "2024-06-15T10:30:00Z",
        "project_venues": []
    })
}

fn association_json(outreach: &str) -> Value {
    json!({
        "id": LINK_ID,
        "project_id": PROJECT_ID,
        "venue_id": VENUE_ID,
        "outreach_status": outreach,
        "include_in_proposal": true,
        "created_at": "2024-06-15T10:30:00Z",
        "updated_at": "2024-06-15T10:30:00Z",
        "venue": venue_json(VENUE_ID, "Spreewerk")
    })
}

fn page_json(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "items": items,
        "total": total,
        "page": 1,
        "page_size": 100
    })
}

/// Mount the three mocks every login needs: the token exchange, the
/// account lookup, and the initial project listing.
async fn mount_login(server: &MockServer, projects: Vec<Value>) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "3c4d5e6f-7a8b-4c9d-8e0f-1a2b3c4d5e6f",
            "name": "Anna",
            "email": "anna@qed.events",
            "role": "event_manager",
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(projects)))
        .mount(server)
        .await;
}

async fn connected_workspace(server: &MockServer) -> Workspace {
    let config = BackendConfig {
        url: server.uri().parse().unwrap(),
        auth: AuthCredentials::Credentials {
            email: "anna@qed.events".into(),
            password: "hunter2-but-longer".to_string().into(),
        },
        timeout: Duration::from_secs(5),
        refresh_interval_secs: 0,
        ..Default::default()
    };
    let workspace = Workspace::new(config).unwrap();
    workspace.connect().await.unwrap();
    workspace
}

// ── Connection lifecycle ────────────────────────────────────────────

#[tokio::test]
async fn connect_logs_in_and_lands_on_project_list() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    let workspace = connected_workspace(&server).await;

    assert_eq!(
        *workspace.connection_state().borrow(),
        ConnectionState::Connected
    );
    assert_eq!(workspace.store().view(), View::Projects);
    assert_eq!(workspace.projects_snapshot().len(), 1);
    assert!(!workspace.store().busy());

    let user = workspace.current_user().unwrap();
    assert_eq!(user.email, "anna@qed.events");

    workspace.disconnect().await;
}

#[tokio::test]
async fn rejected_login_reports_failed_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let config = BackendConfig {
        url: server.uri().parse().unwrap(),
        auth: AuthCredentials::Credentials {
            email: "anna@qed.events".into(),
            password: "wrong".to_string().into(),
        },
        refresh_interval_secs: 0,
        ..Default::default()
    };
    let workspace = Workspace::new(config).unwrap();
    let result = workspace.connect().await;

    assert!(matches!(
        result,
        Err(CoreError::AuthenticationFailed { .. })
    ));
    assert_eq!(
        *workspace.connection_state().borrow(),
        ConnectionState::Failed
    );
    assert!(!workspace.session_state().borrow().is_logged_in());
}

// ── View transitions ────────────────────────────────────────────────

#[tokio::test]
async fn opening_a_project_sets_active_and_loads_associations() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([association_json("sent")])))
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace
        .load_view(View::ProjectDetails(project_id()))
        .await
        .unwrap();

    assert_eq!(workspace.store().view(), View::ProjectDetails(project_id()));
    assert_eq!(workspace.store().active_project(), Some(project_id()));
    assert_eq!(workspace.links_snapshot().len(), 1);
    assert_eq!(
        workspace.links_snapshot()[0].outreach_status,
        OutreachStatus::Sent
    );

    workspace.disconnect().await;
}

#[tokio::test]
async fn top_level_navigation_clears_active_project() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace
        .load_view(View::ProjectDetails(project_id()))
        .await
        .unwrap();
    assert_eq!(workspace.store().active_project(), Some(project_id()));

    // Back to the top-level project list: the pointer is dropped.
    workspace.load_view(View::Projects).await.unwrap();
    assert_eq!(workspace.store().active_project(), None);

    workspace.disconnect().await;
}

#[tokio::test]
async fn failed_fetch_keeps_cache_and_still_switches_view() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace.load_view(View::Venues).await.unwrap();

    // The gallery fetch failed, but the view renders (empty) and the
    // project cache from the previous view is untouched.
    assert_eq!(workspace.store().view(), View::Venues);
    assert!(workspace.venues_snapshot().is_empty());
    assert_eq!(workspace.projects_snapshot().len(), 1);
    assert!(!workspace.store().busy());

    workspace.disconnect().await;
}

#[tokio::test]
async fn superseded_fetch_batch_is_discarded() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    // The gallery answers slowly; the client list answers immediately.
    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![venue_json(VENUE_ID, "Spreewerk")]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": CLIENT_ID,
            "name": "Nordwind GmbH",
            "standard_requirements": {},
            "created_at": "2024-06-15T10:30:00Z",
            "updated_at": "2024-06-15T10:30:00Z"
        }])))
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;

    let slow = {
        let workspace = workspace.clone();
        tokio::spawn(async move { workspace.load_view(View::Venues).await })
    };
    // Let the gallery navigation get its request in flight, then
    // navigate away before it answers.
    tokio::time::sleep(Duration::from_millis(100)).await;
    workspace.load_view(View::Clients).await.unwrap();

    slow.await.unwrap().unwrap();

    // The slow batch lost the race: its results never land.
    assert_eq!(workspace.store().view(), View::Clients);
    assert!(workspace.venues_snapshot().is_empty());
    assert_eq!(workspace.clients_snapshot().len(), 1);
    assert!(!workspace.store().busy());

    workspace.disconnect().await;
}

#[tokio::test]
async fn navigation_clears_the_selection() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![venue_json(VENUE_ID, "Spreewerk")])),
        )
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace.load_view(View::Venues).await.unwrap();

    assert!(workspace.store().toggle_venue_selection(venue_id()));
    assert_eq!(workspace.store().selected_venue_count(), 1);

    workspace.load_view(View::Projects).await.unwrap();
    assert_eq!(workspace.store().selected_venue_count(), 0);

    // Re-entering the gallery does not resurrect it.
    workspace.load_view(View::Venues).await.unwrap();
    assert_eq!(workspace.store().selected_venue_count(), 0);

    workspace.disconnect().await;
}

#[tokio::test]
async fn gallery_filter_is_forwarded_to_the_backend() {
    let server = MockServer::start().await;
    mount_login(&server, vec![]).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .and(query_param("city", "Berlin"))
        .and(query_param("min_capacity", "200"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![venue_json(VENUE_ID, "Spreewerk")])),
        )
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace
        .apply_gallery_filter(GalleryFilter {
            city: Some("Berlin".into()),
            min_capacity: Some(200),
            ..Default::default()
        })
        .await
        .unwrap();
    workspace.load_view(View::Venues).await.unwrap();

    assert_eq!(workspace.venues_snapshot().len(), 1);
    workspace.disconnect().await;
}

// ── Session expiry ──────────────────────────────────────────────────

#[tokio::test]
async fn expired_token_forces_logout_and_redirect() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clients/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    assert!(workspace.session_state().borrow().is_logged_in());

    // Two navigations race; both come back 401. Exactly one of them
    // drives the logout, and the state ends up scrubbed either way.
    let (a, b) = tokio::join!(
        {
            let workspace = workspace.clone();
            async move { workspace.load_view(View::Venues).await }
        },
        {
            let workspace = workspace.clone();
            async move { workspace.load_view(View::Clients).await }
        },
    );
    let expired = [a, b]
        .iter()
        .filter(|r| matches!(r, Err(CoreError::SessionExpired)))
        .count();
    assert!(expired >= 1, "at least the winning navigation must report expiry");

    assert!(!workspace.session_state().borrow().is_logged_in());
    assert_eq!(workspace.store().view(), View::Projects);
    assert_eq!(workspace.store().active_project(), None);
    assert_eq!(
        *workspace.connection_state().borrow(),
        ConnectionState::Disconnected
    );
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn attach_without_active_project_makes_no_request() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![venue_json(VENUE_ID, "Spreewerk")])),
        )
        .mount(&server)
        .await;
    // The attach endpoint must never be hit.
    Mock::given(method("POST"))
        .and(path_regex(r"^/api/v1/projects/.+/venues$"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace.load_view(View::Venues).await.unwrap();
    workspace.store().toggle_venue_selection(venue_id());

    let result = workspace.attach_selection().await;

    assert!(matches!(result, Err(CoreError::NoActiveProject)));
    // Redirected to the project list so the user can pick one.
    assert_eq!(workspace.store().view(), View::Projects);

    workspace.disconnect().await;
}

#[tokio::test]
async fn attach_batch_tolerates_individual_failures() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let rejected = "1111aaaa-2222-4bbb-8ccc-3333dddd4444";
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .and(body_json(json!({"venue_id": VENUE_ID})))
        .respond_with(ResponseTemplate::new(201).set_body_json(association_json("draft")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .and(body_json(json!({"venue_id": rejected})))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Venue is already attached to this project"})),
        )
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace
        .load_view(View::ProjectDetails(project_id()))
        .await
        .unwrap();

    let report = workspace
        .attach_to_active(vec![venue_id(), rejected.parse().unwrap()])
        .await
        .unwrap();

    assert_eq!(report.attached.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(!report.all_succeeded());
    assert_eq!(report.failed[0].0, rejected.parse::<VenueId>().unwrap());
    // The successful attach landed in the cache despite the failure.
    assert_eq!(workspace.links_snapshot().len(), 1);

    workspace.disconnect().await;
}

#[tokio::test]
async fn outreach_update_folds_into_cached_association() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([association_json("draft")])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!(
            "/api/v1/projects/{PROJECT_ID}/venues/{VENUE_ID}"
        )))
        .and(body_json(json!({"outreach_status": "sent"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": LINK_ID,
            "project_id": PROJECT_ID,
            "venue_id": VENUE_ID,
            "outreach_status": "sent",
            "include_in_proposal": true,
            "created_at": "2024-06-15T10:30:00Z",
            "updated_at": "2024-06-15T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace
        .load_view(View::ProjectDetails(project_id()))
        .await
        .unwrap();

    let result = workspace
        .execute(Command::UpdateLink {
            project_id: project_id(),
            venue_id: venue_id(),
            update: UpdateLinkRequest {
                outreach_status: Some(OutreachStatus::Sent),
                ..Default::default()
            },
        })
        .await
        .unwrap();

    let CommandResult::Link(link) = result else {
        panic!("expected Link result");
    };
    assert_eq!(link.outreach_status, OutreachStatus::Sent);
    // The PATCH response has no embedded venue; the cached copy
    // survives the fold.
    assert_eq!(link.venue.name, "Spreewerk");
    assert_eq!(
        workspace.links_snapshot()[0].outreach_status,
        OutreachStatus::Sent
    );

    workspace.disconnect().await;
}

#[tokio::test]
async fn deleting_the_active_project_falls_back_to_the_list() {
    let server = MockServer::start().await;
    mount_login(&server, vec![project_json(PROJECT_ID)]).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([association_json("sent")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let workspace = connected_workspace(&server).await;
    workspace
        .load_view(View::ProjectDetails(project_id()))
        .await
        .unwrap();
    assert_eq!(workspace.links_snapshot().len(), 1);

    let result = workspace
        .execute(Command::DeleteProject { id: project_id() })
        .await
        .unwrap();
    assert!(matches!(result, CommandResult::Ok));

    // The weak pointer is cleared, the dependent view falls back, and
    // the cached associations of the dead project are gone.
    assert_eq!(workspace.store().active_project(), None);
    assert_eq!(workspace.store().view(), View::Projects);
    assert!(workspace.links_snapshot().is_empty());

    workspace.disconnect().await;
}
