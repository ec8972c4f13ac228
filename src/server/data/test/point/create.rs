use super::*;

/// Tests creating a point.
///
/// Verifies that every field of the parameters is stored and that new points
/// are visible.
///
/// Expected: Ok with stored fields and no hidden timestamp
#[tokio::test]
async fn creates_visible_point() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;

    let point = PointRepository::new(db)
        .create(CreatePointParam {
            map_id: map.id,
            user_id: user.id,
            latitude: 41.9,
            longitude: 12.5,
            city: Some("Rome".to_string()),
            country: Some("Italy".to_string()),
            continent: Some("Europe".to_string()),
            description: Some("Colosseum".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(point.map_id, map.id);
    assert_eq!(point.user_id, user.id);
    assert_eq!(point.city.as_deref(), Some("Rome"));
    assert!(point.region.is_none());
    assert!(point.is_visible());

    let found = PointRepository::new(db).find_by_id(point.id).await?;
    assert_eq!(found, Some(point));

    Ok(())
}
