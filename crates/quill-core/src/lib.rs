//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains the post model, pagination and lookup rules, and the
//! admin configuration, with zero infrastructure dependencies.

pub mod admin;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod slug;

pub use error::{DomainError, RepoError};
