//! Data transfer objects shared by the HTTP API.
//!
//! These types define the JSON request and response bodies. Server-side domain
//! models convert into them at the controller boundary.

pub mod api;
pub mod map;
pub mod notification;
pub mod point;
pub mod route;
pub mod stats;
pub mod user;
