// src/middleware/mod.rs
// DOCUMENTATION: Request middleware
// PURPOSE: Re-export the access gate

pub mod access_gate;

pub use access_gate::{require_password, AccessGate, AUTH_COOKIE};
