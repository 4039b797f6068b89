//! Catalog use-case services.
//!
//! # Responsibility
//! - Validate requests and translate storage conflicts into typed errors.
//! - Keep callers decoupled from storage details.

pub mod book_service;
pub mod error;
pub mod named_service;
