//! Point factory for creating test point entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test points with customizable geography.
///
/// Defaults to a visible point at (0, 0) with no resolved place names.
pub struct PointFactory<'a> {
    db: &'a DatabaseConnection,
    map_id: i32,
    user_id: i32,
    latitude: f64,
    longitude: f64,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    continent: Option<String>,
    category: Option<String>,
    hidden: bool,
}

impl<'a> PointFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, map_id: i32, user_id: i32) -> Self {
        Self {
            db,
            map_id,
            user_id,
            latitude: 0.0,
            longitude: 0.0,
            city: None,
            region: None,
            country: None,
            continent: None,
            category: None,
            hidden: false,
        }
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn continent(mut self, continent: impl Into<String>) -> Self {
        self.continent = Some(continent.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Marks the point as hidden, as if its owner had left the map.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Builds and inserts the point entity into the database.
    pub async fn build(self) -> Result<entity::point::Model, DbErr> {
        let now = Utc::now();
        entity::point::ActiveModel {
            map_id: ActiveValue::Set(self.map_id),
            user_id: ActiveValue::Set(self.user_id),
            latitude: ActiveValue::Set(self.latitude),
            longitude: ActiveValue::Set(self.longitude),
            city: ActiveValue::Set(self.city),
            region: ActiveValue::Set(self.region),
            country: ActiveValue::Set(self.country),
            continent: ActiveValue::Set(self.continent),
            category: ActiveValue::Set(self.category),
            description: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            hidden_at: ActiveValue::Set(self.hidden.then_some(now)),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a visible point in `city`, `country` on `continent`.
pub async fn create_point(
    db: &DatabaseConnection,
    map_id: i32,
    user_id: i32,
    city: &str,
    country: &str,
    continent: &str,
) -> Result<entity::point::Model, DbErr> {
    PointFactory::new(db, map_id, user_id)
        .city(city)
        .country(country)
        .continent(continent)
        .build()
        .await
}
