//! Wire models mirrored from the engine's REST API (camelCase JSON).

pub mod admin;
pub mod auth;
pub mod file;
pub mod form;
pub mod menu;
pub mod notification;
pub mod page;
pub mod workflow;

pub use admin::*;
pub use auth::*;
pub use file::*;
pub use form::*;
pub use menu::*;
pub use notification::*;
pub use page::*;
pub use workflow::*;
