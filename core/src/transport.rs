//! The I/O seam between `TodoClient` and the network.
//!
//! `TodoApi` only describes requests; a `Transport` executes them. Anything
//! that reaches a server (reqwest in the CLI, ureq in tests) or pretends to
//! (scripted fakes) implements this trait.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` and return whatever the server answered.
    ///
    /// Non-2xx statuses are returned as `Ok` data; only failures that leave
    /// no response at all are `Err(ApiError::Transport)`.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
