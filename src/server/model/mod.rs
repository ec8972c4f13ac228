//! Domain models and operation-specific parameter types.
//!
//! Domain models are what the service layer works with. Repositories convert SeaORM
//! entity models into them at the data boundary, and controllers convert them into
//! DTOs at the HTTP boundary. Parameter types (`*Param`) carry the validated input of
//! a single service operation.

pub mod achievement;
pub mod map;
pub mod notification;
pub mod point;
pub mod ranking;
pub mod route;
pub mod user;
