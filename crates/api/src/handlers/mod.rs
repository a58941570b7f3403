//! HTTP handlers, one module per resource.

pub mod auth;
pub mod hotspot_images;
pub mod hotspots;
pub mod tours;
pub mod users;

use serde::Serialize;

/// `{ "message": ... }` body returned by deletes and password flows.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
