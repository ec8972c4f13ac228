//! HTTP request handlers.
//!
//! Controllers authenticate the caller, convert DTOs to parameters, call the service
//! layer and convert the resulting domain models back to DTOs.

pub mod map;
pub mod notification;
pub mod point;
pub mod route;
pub mod user;
