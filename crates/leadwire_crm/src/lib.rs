//! CRM sync for Leadwire.
//!
//! Forwards a call record to one of a closed set of CRM backends using the
//! requesting user's stored credentials. Dispatch is a tag → provider table
//! over the [`provider::CrmProvider`] capability trait, so each backend owns
//! its credential shape and its remote-call body.

#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod provider;
pub mod routes;

#[cfg(test)]
mod handlers_test;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;
pub use provider::{provider_for, CrmProvider, CrmType};

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::CrmApiDoc;
}
