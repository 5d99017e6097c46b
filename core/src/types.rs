//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently,
//! so the client never depends on Axum internals. Integration tests catch any
//! schema drift between the two crates.
//!
//! Ids are assigned by the server and opaque to the client. `TodoId` keeps
//! whatever JSON form the server used (number or string) so it can be echoed
//! back into request paths unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Server-assigned identifier of a todo.
///
/// Numbers are kept as `serde_json::Number`, so negative, fractional and
/// out-of-range ids survive unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Num(Number),
    Str(String),
}

impl TodoId {
    /// Interpret user-typed input: a JSON number if it parses as one,
    /// otherwise the raw string.
    pub fn parse_lossy(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<Number>()
            .map(TodoId::Num)
            .unwrap_or_else(|_| TodoId::Str(raw.to_string()))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Num(n) => write!(f, "{n}"),
            TodoId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TodoId {
    fn from(n: u64) -> Self {
        TodoId::Num(n.into())
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Str(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        TodoId::Str(s)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for creating a new todo. The server assigns the id and
/// starts every item as not completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }
}
