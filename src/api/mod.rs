//! Notes API Gateway
//!
//! HTTP layer for the SaaS Notes backend, built on reqwest.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/login` - Exchange credentials for a token and user
//!
//! ## Tenant
//! - `GET /tenant` - Plan, note count and note limit of the caller's tenant
//! - `POST /tenants/:id/upgrade` - Move a tenant to the Pro plan
//!
//! ## Notes
//! - `GET /notes` - List notes
//! - `POST /notes` - Create a note
//! - `PUT /notes/:id` - Replace a note's title and content
//! - `DELETE /notes/:id` - Delete a note (204 No Content)
//!
//! Every request goes through [`ApiClient::request`].

mod client;

pub use client::{ApiClient, ErrorBody};
pub use reqwest::Method;
