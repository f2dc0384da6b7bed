//! Platform CRUD library.
//!
//! Resource registration and admin panel wiring: the [`arbitrator`] collects
//! resources and hooks them into [`permissions`] and the dashboard [`menu`];
//! [`routes`] serves the list, create, edit and view screens for each one.
//! The `platform-crud` binary runs the server.

pub mod arbitrator;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod menu;
pub mod model;
pub mod permissions;
pub mod resource;
pub mod resources;
pub mod routes;
pub mod session;
pub mod state;
pub mod theme;
pub mod validation;

pub use arbitrator::{Arbitrator, ArbitratorError, ResourceFactory, ResourceRef};
pub use config::Config;
pub use resource::Resource;
pub use state::AppState;
