//! Terminal front end for a remote to-do list.
//!
//! `todo` talks to any server exposing `/api/todos` through
//! [`HttpTransport`] and draws the list with [`TerminalView`].

pub mod app;
pub mod config;
pub mod transport;
pub mod view;

pub use app::{run, session, Session};
pub use config::{Cli, Command};
pub use transport::HttpTransport;
pub use view::TerminalView;
