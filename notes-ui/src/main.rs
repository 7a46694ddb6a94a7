//! SaaS Notes Dashboard
//!
//! Multi-tenant note management built with Leptos (WASM).
//!
//! # Features
//!
//! - Tenant-scoped login with a persisted session
//! - Plan and usage overview with Pro upgrade for admins
//! - Create, edit and delete notes
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the SaaS Notes API over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
