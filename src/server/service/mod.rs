//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and the ranking index
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//!
//! The achievement engine (`achievement`) and the ranking functions (`ranking`) are pure
//! and usable without a database.

pub mod achievement;
pub mod map;
pub mod notification;
pub mod point;
pub mod ranking;
pub mod route;
pub mod user;
