//! # todo-manager
//!
//! A small web TODO list: items can be created, finished exactly once and
//! deleted, and no more than a configured number of items may be unfinished
//! at any time.
//!
//! ## Layers
//!
//! - [`domain`]: item, description and summary types plus business-rule errors
//! - [`application`]: [`application::TodoService`], which owns every rule
//! - [`infrastructure`]: configuration, repositories (in-memory, Postgres)
//!   and the factory choosing between them
//! - [`api`]: HTML pages with flash messages, a JSON API and the router

#![forbid(unsafe_code)]

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
