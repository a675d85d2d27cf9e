// Project endpoints
//
// Project CRUD plus the venue-association sub-resource: attach/detach,
// outreach edits, AI description generation, and proposal documents.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    AttachVenueRequest, CreateProjectRequest, Deleted, GeneratedDescription, Project,
    ProjectStatus, ProjectVenue, ProjectVenueDetail, UpdateProjectRequest,
    UpdateProjectVenueRequest,
};

impl ApiClient {
    /// List the authenticated user's projects, fetching every page.
    ///
    /// `GET /api/v1/projects`
    pub async fn list_projects(&self, status: Option<ProjectStatus>) -> Result<Vec<Project>, Error> {
        let mut params = Vec::new();
        if let Some(status) = status {
            params.push(("status", status.as_str().to_owned()));
        }
        self.get_paginated("/api/v1/projects", &params).await
    }

    /// Fetch a single project with its venue associations embedded.
    ///
    /// `GET /api/v1/projects/{id}`
    pub async fn get_project(&self, project_id: uuid::Uuid) -> Result<Project, Error> {
        self.get(&format!("/api/v1/projects/{project_id}")).await
    }

    /// Create a project.
    ///
    /// `POST /api/v1/projects`
    pub async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, Error> {
        self.post("/api/v1/projects", request).await
    }

    /// Update project fields; only the set fields are sent.
    ///
    /// `PATCH /api/v1/projects/{id}`
    pub async fn update_project(
        &self,
        project_id: uuid::Uuid,
        request: &UpdateProjectRequest,
    ) -> Result<Project, Error> {
        self.patch(&format!("/api/v1/projects/{project_id}"), request)
            .await
    }

    /// Delete a project and its venue associations.
    ///
    /// `DELETE /api/v1/projects/{id}`
    pub async fn delete_project(&self, project_id: uuid::Uuid) -> Result<Deleted, Error> {
        self.delete(&format!("/api/v1/projects/{project_id}")).await
    }

    // ── Venue associations ──────────────────────────────────────────

    /// List the venues attached to a project (full venue embedded).
    ///
    /// `GET /api/v1/projects/{id}/venues` -- a bare array, not a
    /// paginated envelope.
    pub async fn list_project_venues(
        &self,
        project_id: uuid::Uuid,
    ) -> Result<Vec<ProjectVenueDetail>, Error> {
        self.get(&format!("/api/v1/projects/{project_id}/venues"))
            .await
    }

    /// Attach a venue to a project.
    ///
    /// `POST /api/v1/projects/{id}/venues`
    pub async fn attach_venue(
        &self,
        project_id: uuid::Uuid,
        venue_id: uuid::Uuid,
    ) -> Result<ProjectVenueDetail, Error> {
        debug!(project = %project_id, venue = %venue_id, "attaching venue");
        self.post(
            &format!("/api/v1/projects/{project_id}/venues"),
            &AttachVenueRequest { venue_id },
        )
        .await
    }

    /// Update an association (outreach status, quoted price, proposal
    /// inclusion, descriptions, ...); only the set fields are sent.
    ///
    /// `PATCH /api/v1/projects/{id}/venues/{venueId}`
    ///
    /// Unlike attach and list, the response is the bare association
    /// without the embedded venue.
    pub async fn update_project_venue(
        &self,
        project_id: uuid::Uuid,
        venue_id: uuid::Uuid,
        request: &UpdateProjectVenueRequest,
    ) -> Result<ProjectVenue, Error> {
        self.patch(
            &format!("/api/v1/projects/{project_id}/venues/{venue_id}"),
            request,
        )
        .await
    }

    /// Remove a venue from a project.
    ///
    /// `DELETE /api/v1/projects/{id}/venues/{venueId}`
    pub async fn detach_venue(
        &self,
        project_id: uuid::Uuid,
        venue_id: uuid::Uuid,
    ) -> Result<Deleted, Error> {
        debug!(project = %project_id, venue = %venue_id, "detaching venue");
        self.delete(&format!("/api/v1/projects/{project_id}/venues/{venue_id}"))
            .await
    }

    /// Generate an AI description for an attached venue.
    ///
    /// `POST /api/v1/projects/{id}/venues/{venueId}/generate-description`
    ///
    /// Requires `ai_context` on the association; the backend answers
    /// 400 otherwise.
    pub async fn generate_description(
        &self,
        project_id: uuid::Uuid,
        venue_id: uuid::Uuid,
    ) -> Result<GeneratedDescription, Error> {
        self.post_empty(&format!(
            "/api/v1/projects/{project_id}/venues/{venue_id}/generate-description"
        ))
        .await
    }

    // ── Proposal documents ──────────────────────────────────────────

    /// Render the proposal as HTML.
    ///
    /// `GET /api/v1/projects/{id}/proposal/preview`
    pub async fn proposal_preview(&self, project_id: uuid::Uuid) -> Result<String, Error> {
        self.get_text(&format!("/api/v1/projects/{project_id}/proposal/preview"))
            .await
    }

    /// Render the proposal as a PDF.
    ///
    /// `GET /api/v1/projects/{id}/proposal/pdf`
    pub async fn proposal_pdf(&self, project_id: uuid::Uuid) -> Result<Vec<u8>, Error> {
        self.get_bytes(&format!("/api/v1/projects/{project_id}/proposal/pdf"))
            .await
    }
}
