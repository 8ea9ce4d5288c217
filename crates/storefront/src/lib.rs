//! Storefront widget state: catalog, cart, wishlist, panels, search and the
//! click dispatcher, independent of any DOM.

pub mod action;
pub mod config;
pub mod controller;
pub mod panels;

pub use action::*;
pub use config::*;
pub use controller::*;
pub use panels::*;
