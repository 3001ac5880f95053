//! REST API layer for HTTP request/response handling.
//!
//! This layer validates HTTP requests, translates them into service calls and
//! formats responses.
//!
//! # Modules
//!
//! - [`validation`] - Schema-driven request validation and extractors
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod validation;
