//! Page collection and navigation state for a diagram editor.
//!
//! `domain` holds pages and the collection invariants, `application` the
//! controller and view state machines, `infrastructure` a SQLite-backed
//! page store.

pub mod application;
pub mod domain;
pub mod infrastructure;
