//! Navigation menu for the admin dashboard.
//!
//! Menus are not stored: each page render asks the [`MenuComposer`] to build
//! a fresh [`DashboardMenu`] from its registered [`MenuProvider`]s.

mod composer;
mod item;

pub use composer::{MenuComposer, MenuProvider};
pub use item::{DashboardMenu, ItemMenu, Menu};
