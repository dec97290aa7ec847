//! Networking for the proxy endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the single POST `/api/proxy` round trip and the [`TutorApi`]
//! seam that page state calls through. Wire types live in the `proto` crate.

pub mod api;

pub use api::{ClientError, ProxyClient, TutorApi};
