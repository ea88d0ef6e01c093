pub mod auth;
pub mod forms;
pub mod instances;
pub mod menu;
pub mod nav;
pub mod notifications;
pub mod settings;
pub mod tasks;
pub mod users;
