// --- File: crates/leadwire_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Trait definitions here decouple the handlers from concrete store and
//! provider implementations, which keeps the handlers testable with in-memory
//! fakes.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result.
///
/// Used by the object-safe service traits ([`CredentialStore`],
/// `CrmProvider`) whose implementations clone their inputs into the returned
/// future.
///
/// [`CredentialStore`]: https://docs.rs/leadwire-credentials
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
