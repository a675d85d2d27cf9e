// Client (customer account) endpoints
//
// Plain CRUD. The list endpoint returns a bare array and, unlike the
// other resources, is mounted with a trailing slash.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Client, CreateClientRequest, Deleted, UpdateClientRequest};

impl ApiClient {
    /// List all clients.
    ///
    /// `GET /api/v1/clients/`
    pub async fn list_clients(&self) -> Result<Vec<Client>, Error> {
        self.get("/api/v1/clients/").await
    }

    /// Fetch a single client.
    ///
    /// `GET /api/v1/clients/{id}`
    pub async fn get_client(&self, client_id: uuid::Uuid) -> Result<Client, Error> {
        self.get(&format!("/api/v1/clients/{client_id}")).await
    }

    /// Create a client.
    ///
    /// `POST /api/v1/clients/`
    pub async fn create_client(&self, request: &CreateClientRequest) -> Result<Client, Error> {
        self.post("/api/v1/clients/", request).await
    }

    /// Update client fields; only the set fields are sent.
    ///
    /// `PATCH /api/v1/clients/{id}`
    pub async fn update_client(
        &self,
        client_id: uuid::Uuid,
        request: &UpdateClientRequest,
    ) -> Result<Client, Error> {
        self.patch(&format!("/api/v1/clients/{client_id}"), request)
            .await
    }

    /// Delete a client.
    ///
    /// `DELETE /api/v1/clients/{id}`
    pub async fn delete_client(&self, client_id: uuid::Uuid) -> Result<Deleted, Error> {
        self.delete(&format!("/api/v1/clients/{client_id}")).await
    }
}
