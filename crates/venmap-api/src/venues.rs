// Venue endpoints
//
// Venue CRUD, photo sub-resources, and CSV bulk import. The list
// endpoint filters server-side (city, min_capacity, facilities) and
// paginates; `list_venues` drains every page.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    CreateVenueRequest, Deleted, Photo, UpdateVenueRequest, Venue, VenueQuery, VenueUploadResult,
};

impl ApiClient {
    /// List venues matching `query`, fetching every page.
    ///
    /// `GET /api/v1/venues`
    pub async fn list_venues(&self, query: &VenueQuery) -> Result<Vec<Venue>, Error> {
        self.get_paginated("/api/v1/venues", &query.query_pairs())
            .await
    }

    /// Fetch a single venue with its photos.
    ///
    /// `GET /api/v1/venues/{id}`
    pub async fn get_venue(&self, venue_id: uuid::Uuid) -> Result<Venue, Error> {
        self.get(&format!("/api/v1/venues/{venue_id}")).await
    }

    /// Create a venue.
    ///
    /// `POST /api/v1/venues`
    pub async fn create_venue(&self, request: &CreateVenueRequest) -> Result<Venue, Error> {
        self.post("/api/v1/venues", request).await
    }

    /// Update venue fields; only the set fields are sent.
    ///
    /// `PATCH /api/v1/venues/{id}`
    pub async fn update_venue(
        &self,
        venue_id: uuid::Uuid,
        request: &UpdateVenueRequest,
    ) -> Result<Venue, Error> {
        self.patch(&format!("/api/v1/venues/{venue_id}"), request)
            .await
    }

    /// Soft-delete a venue.
    ///
    /// `DELETE /api/v1/venues/{id}`
    pub async fn delete_venue(&self, venue_id: uuid::Uuid) -> Result<Deleted, Error> {
        self.delete(&format!("/api/v1/venues/{venue_id}")).await
    }

    // ── Photos ──────────────────────────────────────────────────────

    /// Upload a photo for a venue (multipart).
    ///
    /// `POST /api/v1/venues/{id}/photos`
    ///
    /// The backend accepts JPEG and PNG; `mime` must match the bytes.
    pub async fn upload_photo(
        &self,
        venue_id: uuid::Uuid,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
        caption: Option<&str>,
        display_order: u32,
    ) -> Result<Photo, Error> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(mime)?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("display_order", display_order.to_string());
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_owned());
        }

        debug!(venue = %venue_id, file_name, "uploading photo");
        self.post_multipart(&format!("/api/v1/venues/{venue_id}/photos"), form)
            .await
    }

    /// Delete a photo from a venue.
    ///
    /// `DELETE /api/v1/venues/{id}/photos/{photoId}`
    pub async fn delete_photo(
        &self,
        venue_id: uuid::Uuid,
        photo_id: uuid::Uuid,
    ) -> Result<Deleted, Error> {
        self.delete(&format!("/api/v1/venues/{venue_id}/photos/{photo_id}"))
            .await
    }

    // ── CSV import ──────────────────────────────────────────────────

    /// Bulk-import venues from a CSV file (multipart).
    ///
    /// `POST /api/v1/venues/upload-csv`
    ///
    /// Row failures do not fail the call: the result carries per-row
    /// errors alongside the venues that were created.
    pub async fn upload_venues_csv(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<VenueUploadResult, Error> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        debug!(file_name, "uploading venue CSV");
        self.post_multipart("/api/v1/venues/upload-csv", form).await
    }

    /// Download the CSV import template (headers plus one example row).
    ///
    /// `GET /api/v1/venues/csv-template`
    pub async fn venues_csv_template(&self) -> Result<String, Error> {
        self.get_text("/api/v1/venues/csv-template").await
    }
}
