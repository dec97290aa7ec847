//! Proxy services: request dispatch plus the two prompt-building handlers.

pub mod feedback;
pub mod proxy;
pub mod tutor;
