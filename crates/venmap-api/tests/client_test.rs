#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use venmap_api::types::{Deleted, OutreachStatus, VenueQuery};
use venmap_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

const VENUE_ID: &str = "7f2e9c1a-4b3d-4e5f-8a6b-1c2d3e4f5a6b";
const PROJECT_ID: &str = "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d";

fn venue_json(name: &str, city: &str, capacity: u32) -> Value {
    json!({
        "id": VENUE_ID,
        "name": name,
        "city": city,
        "capacity": capacity,
        "facilities": ["wifi", "parking"],
        "event_types": ["conference"],
        "contact_email": "events@example.com",
        "is_deleted": false,
        "created_at": "2024-06-15T10:30:00Z",
        "updated_at": "2024-06-15T10:30:00Z",
        "photos": []
    })
}

fn page_json(items: Vec<Value>, total: u64, page: u32) -> Value {
    json!({
        "items": items,
        "total": total,
        "page": page,
        "page_size": 100
    })
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn login_installs_bearer_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({
            "email": "anna@qed.events",
            "password": "hunter2-but-longer"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "3c4d5e6f-7a8b-4c9d-8e0f-1a2b3c4d5e6f",
            "name": "Anna",
            "email": "anna@qed.events",
            "role": "event_manager",
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2-but-longer".to_string().into();
    let token = client.login("anna@qed.events", &secret).await.unwrap();
    assert_eq!(token.token_type, "bearer");
    assert!(client.has_token());

    // The mock only matches with the Authorization header attached.
    let user = client.me().await.unwrap();
    assert_eq!(user.email, "anna@qed.events");
}

#[tokio::test]
async fn login_rejection_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("anna@qed.events", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(
                message.contains("Incorrect email or password"),
                "expected server detail in message, got: {message}"
            );
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
    assert!(!client.has_token());
}

#[tokio::test]
async fn protected_call_401_is_auth_expired() {
    let (server, client) = setup().await;
    client.set_token("stale-token".to_string().into());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Could not validate credentials"})))
        .mount(&server)
        .await;

    let result = client.list_venues(&VenueQuery::default()).await;

    match result {
        Err(ref e) => assert!(e.is_auth_expired(), "expected AuthExpired, got: {e:?}"),
        Ok(_) => panic!("expected AuthExpired error"),
    }
}

// ── Error mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn api_error_carries_server_detail() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/venues/{VENUE_ID}")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": format!("Venue with id {VENUE_ID} not found")})),
        )
        .mount(&server)
        .await;

    let result = client.get_venue(VENUE_ID.parse().unwrap()).await;

    match result {
        Err(Error::Api { ref message, status }) => {
            assert_eq!(status, 404);
            assert!(
                message.contains("not found"),
                "expected server detail, got: {message}"
            );
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn api_error_without_detail_uses_status_reason() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/venues/{VENUE_ID}")))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let result = client.get_venue(VENUE_ID.parse().unwrap()).await;

    match result {
        Err(Error::Api { ref message, status }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn delete_returns_distinct_marker() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/venues/{VENUE_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let deleted = client.delete_venue(VENUE_ID.parse().unwrap()).await.unwrap();
    assert_eq!(deleted, Deleted);
}

// ── Venue tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn list_venues_sends_filter_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .and(query_param("city", "Berlin"))
        .and(query_param("min_capacity", "200"))
        .and(query_param("facilities", "wifi"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![venue_json("Spreewerk", "Berlin", 350)], 1, 1)),
        )
        .mount(&server)
        .await;

    let query = VenueQuery {
        city: Some("Berlin".into()),
        min_capacity: Some(200),
        facilities: vec!["wifi".into()],
    };
    let venues = client.list_venues(&query).await.unwrap();

    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].name, "Spreewerk");
    assert_eq!(venues[0].capacity, 350);
    assert_eq!(venues[0].facilities, vec!["wifi", "parking"]);
}

#[tokio::test]
async fn list_venues_drains_all_pages() {
    let (server, client) = setup().await;

    let full_page: Vec<Value> = (0..100).map(|i| {
        json!({
            "id": Uuid::new_v4(),
            "name": format!("Venue {i}"),
            "city": "Hamburg",
            "capacity": 100 + i,
            "facilities": [],
            "event_types": [],
            "is_deleted": false,
            "created_at": "2024-06-15T10:30:00Z",
            "updated_at": "2024-06-15T10:30:00Z",
            "photos": []
        })
    }).collect();

    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(full_page, 103, 1)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                venue_json("Tail 1", "Hamburg", 10),
                venue_json("Tail 2", "Hamburg", 20),
                venue_json("Tail 3", "Hamburg", 30),
            ],
            103,
            2,
        )))
        .mount(&server)
        .await;

    let venues = client.list_venues(&VenueQuery::default()).await.unwrap();
    assert_eq!(venues.len(), 103);
}

#[tokio::test]
async fn upload_csv_reports_row_errors() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/venues/upload-csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_rows": 3,
            "successful": 2,
            "failed": 1,
            "created_venues": [venue_json("Ok A", "Köln", 80), venue_json("Ok B", "Köln", 90)],
            "errors": [
                {"row": 3, "field": "capacity", "message": "must be greater than 0"}
            ]
        })))
        .mount(&server)
        .await;

    let csv = b"name,city,capacity\nOk A,K\xc3\xb6ln,80\nOk B,K\xc3\xb6ln,90\nBad,K\xc3\xb6ln,0\n".to_vec();
    let result = client.upload_venues_csv("venues.csv", csv).await.unwrap();

    assert_eq!(result.total_rows, 3);
    assert_eq!(result.successful, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(result.created_venues.len(), 2);
    assert_eq!(result.errors[0].row, 3);
    assert_eq!(result.errors[0].field.as_deref(), Some("capacity"));
}

// ── Project association tests ───────────────────────────────────────

fn association_json(outreach: &str) -> Value {
    json!({
        "id": "5e6f7a8b-9c0d-4e1f-8a2b-3c4d5e6f7a8b",
        "project_id": PROJECT_ID,
        "venue_id": VENUE_ID,
        "catering_provider_id": null,
        "outreach_status": outreach,
        "quoted_price": 4200.0,
        "include_in_proposal": true,
        "ai_description": "Generated copy",
        "final_description": null,
        "created_at": "2024-06-15T10:30:00Z",
        "updated_at": "2024-06-15T10:30:00Z",
        "venue": venue_json("Spreewerk", "Berlin", 350)
    })
}

#[tokio::test]
async fn project_venues_deserialize_embedded_venue() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([association_json("sent")])),
        )
        .mount(&server)
        .await;

    let links = client
        .list_project_venues(PROJECT_ID.parse().unwrap())
        .await
        .unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].link.outreach_status, OutreachStatus::Sent);
    assert_eq!(links[0].link.quoted_price, Some(4200.0));
    assert_eq!(links[0].venue.name, "Spreewerk");
}

#[tokio::test]
async fn attach_venue_posts_venue_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/venues")))
        .and(body_json(json!({"venue_id": VENUE_ID})))
        .respond_with(ResponseTemplate::new(201).set_body_json(association_json("draft")))
        .mount(&server)
        .await;

    let link = client
        .attach_venue(PROJECT_ID.parse().unwrap(), VENUE_ID.parse().unwrap())
        .await
        .unwrap();

    assert_eq!(link.link.outreach_status, OutreachStatus::Draft);
}

#[tokio::test]
async fn update_association_sends_only_set_fields() {
    let (server, client) = setup().await;

    // The PATCH response is the bare association, without the
    // embedded venue the attach/list endpoints carry.
    Mock::given(method("PATCH"))
        .and(path(format!(
            "/api/v1/projects/{PROJECT_ID}/venues/{VENUE_ID}"
        )))
        .and(body_json(json!({"outreach_status": "responded"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5e6f7a8b-9c0d-4e1f-8a2b-3c4d5e6f7a8b",
            "project_id": PROJECT_ID,
            "venue_id": VENUE_ID,
            "catering_provider_id": null,
            "outreach_status": "responded",
            "quoted_price": 4200.0,
            "include_in_proposal": true,
            "ai_description": "Generated copy",
            "final_description": null,
            "created_at": "2024-06-15T10:30:00Z",
            "updated_at": "2024-06-15T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let request = venmap_api::types::UpdateProjectVenueRequest {
        outreach_status: Some(OutreachStatus::Responded),
        ..Default::default()
    };
    let link = client
        .update_project_venue(
            PROJECT_ID.parse().unwrap(),
            VENUE_ID.parse().unwrap(),
            &request,
        )
        .await
        .unwrap();

    assert_eq!(link.outreach_status, OutreachStatus::Responded);
    assert_eq!(link.quoted_price, Some(4200.0));
}

#[tokio::test]
async fn generate_description_returns_outcome() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/api/v1/projects/{PROJECT_ID}/venues/{VENUE_ID}/generate-description"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "ai_description": "A bright industrial loft near the Spree.",
            "message": "Description generated successfully"
        })))
        .mount(&server)
        .await;

    let outcome = client
        .generate_description(PROJECT_ID.parse().unwrap(), VENUE_ID.parse().unwrap())
        .await
        .unwrap();

    assert!(outcome.success);
    assert!(outcome.ai_description.unwrap().contains("Spree"));
}

// ── Proposal document tests ─────────────────────────────────────────

#[tokio::test]
async fn proposal_preview_returns_html() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/proposal/preview")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Proposal</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let html = client
        .proposal_preview(PROJECT_ID.parse().unwrap())
        .await
        .unwrap();
    assert!(html.contains("Proposal"));
}

#[tokio::test]
async fn proposal_pdf_returns_bytes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/projects/{PROJECT_ID}/proposal/pdf")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF-1.7 fake".to_vec())
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;

    let bytes = client
        .proposal_pdf(PROJECT_ID.parse().unwrap())
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

// ── Client resource tests ───────────────────────────────────────────

#[tokio::test]
async fn list_clients_uses_trailing_slash() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/clients/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "9a0b1c2d-3e4f-4a5b-8c6d-7e8f9a0b1c2d",
            "name": "Nordwind GmbH",
            "industry": "logistics",
            "standard_requirements": {"av": "projector"},
            "created_at": "2024-06-15T10:30:00Z",
            "updated_at": "2024-06-15T10:30:00Z"
        }])))
        .mount(&server)
        .await;

    let clients = client.list_clients().await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Nordwind GmbH");
    assert_eq!(
        clients[0].standard_requirements.get("av").and_then(|v| v.as_str()),
        Some("projector")
    );
}
