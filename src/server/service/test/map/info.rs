use super::*;

/// Tests the public map summary.
///
/// Verifies that anyone can read the name, type and creator of a map, and that
/// an unknown map is reported as missing.
///
/// Expected: Ok with the creator's username, then Err(AppError::NotFound)
#[tokio::test]
async fn shows_creator_without_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let owner = factory::user::create_user_with_username(db, "ida").await?;
    let map = factory::map::MapFactory::new(db, owner.id)
        .name("Arctic")
        .map_type("Competitive")
        .build()
        .await?;

    let service = MapService::new(db, &ranking);
    let info = service.info(map.id).await?.into_dto();

    assert_eq!(info.id, map.id);
    assert_eq!(info.name, "Arctic");
    assert_eq!(info.map_type, "Competitive");
    assert_eq!(info.creator_username, "ida");

    assert!(matches!(
        service.info(map.id + 1).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
