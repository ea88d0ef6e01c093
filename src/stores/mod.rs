//! Small caches of server state shared across screens.

pub mod notification;
pub mod system;

pub use notification::NotificationStore;
pub use system::SystemStore;
