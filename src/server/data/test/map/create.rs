use super::*;

/// Tests creating a map.
///
/// Verifies that the map type round-trips through its stored name.
///
/// Expected: Ok with the map found by id
#[tokio::test]
async fn creates_map() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = MapRepository::new(db);
    let map = repo
        .create(CreateMapParam {
            creator_id: user.id,
            name: "Summer 2026".to_string(),
            map_type: MapType::Competitive,
        })
        .await?;

    assert_eq!(map.name, "Summer 2026");
    assert_eq!(map.map_type, MapType::Competitive);
    assert_eq!(map.creator_id, user.id);

    let found = repo.find_by_id(map.id).await?;
    assert_eq!(found, Some(map));

    Ok(())
}

/// Tests reading a map with an unrecognised stored type.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn fails_for_unknown_stored_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let map = factory::map::MapFactory::new(db, user.id)
        .map_type("Secret")
        .build()
        .await?;

    let result = MapRepository::new(db).find_by_id(map.id).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
