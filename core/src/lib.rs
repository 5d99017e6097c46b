//! Client core for the todo service.
//!
//! # Overview
//! `TodoClient` keeps an in-memory list of todos in step with a REST backend
//! and pushes the visible subset into a `View`. Requests are described as
//! plain data by `TodoApi` and executed by a `Transport`, so the core never
//! depends on a particular HTTP stack.
//!
//! # Design
//! - `TodoApi` is stateless; it holds only `base_url`.
//! - Each remote operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoClient` swallows and logs every failure; callers observe the
//!   outcome through the cache and the view.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod transport;
pub mod types;
pub mod view;

pub use api::TodoApi;
pub use client::{format_summary, TodoClient};
pub use error::ApiError;
pub use filter::Filter;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
pub use view::View;
