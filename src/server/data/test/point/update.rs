use super::*;

/// Tests a partial update.
///
/// Verifies that only the given fields change, that `Some(None)` clears a
/// value and that a missing point yields `None`.
///
/// Expected: Ok with city changed, category cleared and the rest untouched
#[tokio::test]
async fn updates_only_given_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let point = factory::point::PointFactory::new(db, map.id, user.id)
        .coordinates(48.2, 16.4)
        .city("Vienna")
        .country("Austria")
        .category("cafe")
        .build()
        .await?;

    let repo = PointRepository::new(db);
    let updated = repo
        .update(UpdatePointParam {
            point_id: point.id,
            map_id: map.id,
            user_id: user.id,
            city: Some(Some("Graz".to_string())),
            category: Some(None),
            ..Default::default()
        })
        .await?
        .unwrap();

    assert_eq!(updated.city.as_deref(), Some("Graz"));
    assert_eq!(updated.category, None);
    assert_eq!(updated.country.as_deref(), Some("Austria"));
    assert_eq!(updated.latitude, 48.2);

    let missing = repo
        .update(UpdatePointParam {
            point_id: point.id + 1,
            ..Default::default()
        })
        .await?;
    assert!(missing.is_none());

    Ok(())
}
