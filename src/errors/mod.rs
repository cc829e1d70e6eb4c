//! Error types shared by the Firestore gateway and the authenticator.
//!
//! Each concern gets its own enum so callers can match on what actually went
//! wrong; both expose a short `user_message` for the interactive menu.

pub mod auth;
pub mod gateway;

pub use auth::AuthError;
pub use gateway::GatewayError;
