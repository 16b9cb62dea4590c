//! Request extractors and middleware.
//!
//! - [`auth`]: Bearer credential extraction and verification
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <credential>`
//! 2. [`auth::AuthUser`] verifies the credential with the shared token core
//! 3. The handler receives the verified claims, or the request ends with 401

pub mod auth;
