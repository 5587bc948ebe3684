/// Password hashing and credential checks
pub mod auth;
/// Mapping of domain errors to HTTP responses
pub mod error_handling;
/// Session tokens and the `CurrentUser` extractor
pub mod session;
