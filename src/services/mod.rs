// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod comment_service;
pub mod photo_service;
pub mod update_service;

pub use comment_service::*;
pub use photo_service::*;
pub use update_service::*;
