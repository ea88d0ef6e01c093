//! One thin method per REST endpoint.
//!
//! Each method maps its arguments onto a verb, a path and (for list
//! endpoints) a [`ListQuery`](crate::models::ListQuery); nothing is cached
//! or retried here and errors come back exactly as the HTTP layer produced
//! them.

mod auth;
mod files;
mod forms;
mod instances;
mod menus;
mod notifications;
mod system;
mod tasks;
mod users;
mod workflows;

pub use system::Settings;

use crate::http::HttpClient;

#[derive(Clone)]
pub struct Api {
    http: HttpClient,
}

impl Api {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}
