//! Hrdesk - HR administration service
//!
//! Employee records, departments, activities, attendance, leave requests,
//! payments and penalties, kept in a hosted record backend and served as a
//! JSON API. List pages and form modals are modelled as typed state machines
//! that the HTTP handlers drive per request.

pub mod config;
pub mod entity;
pub mod error;
pub mod form;
pub mod gateway;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
