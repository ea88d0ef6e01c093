//! Headless client for the form workflow engine: session, dynamic routes,
//! navigation guard, REST bindings and paginated list state, plus the
//! `wfadmin` command line built on top of them.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod notify;
pub mod paginated;
pub mod router;
pub mod session;
pub mod storage;
pub mod stores;

pub use app::{AppContext, AppError, AppResult};
pub use error::{ApiError, ApiResult};
