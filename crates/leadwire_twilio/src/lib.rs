#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
/// Call-creation logic: credential shape checks, TwiML, the Twilio REST client.
pub mod logic;
pub mod routes;

#[cfg(test)]
mod handlers_test;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;
