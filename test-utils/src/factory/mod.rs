//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::create_user(&db).await?;
//!     let (owner, map, participant) = factory::helpers::create_map_with_owner(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let point = factory::point::PointFactory::new(&db, map.id, user.id)
//!     .city("Rome")
//!     .country("Italy")
//!     .continent("Europe")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `map` - Create map entities
//! - `map_participant` - Create map membership entities
//! - `point` - Create point entities
//! - `route` - Create route entities
//! - `notification` - Create notification entities
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod helpers;
pub mod map;
pub mod map_participant;
pub mod notification;
pub mod point;
pub mod route;
pub mod user;

pub use map::create_map;
pub use map_participant::create_participant;
pub use notification::create_notification;
pub use point::create_point;
pub use route::create_route;
pub use user::create_user;
