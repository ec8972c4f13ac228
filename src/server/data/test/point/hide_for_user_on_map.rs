use super::*;

/// Tests hiding a user's points on a map.
///
/// Verifies that only the given user's points on the given map are hidden and
/// that they become visible again when restored.
///
/// Expected: Ok with affected row counts and visibility toggled
#[tokio::test]
async fn hides_and_restores_points() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;

    factory::create_point(db, map.id, friend.id, "Rome", "Italy", "Europe").await?;
    factory::create_point(db, map.id, friend.id, "Milan", "Italy", "Europe").await?;
    factory::create_point(db, map.id, owner.id, "Turin", "Italy", "Europe").await?;

    let repo = PointRepository::new(db);

    let hidden = repo.hide_for_user_on_map(map.id, friend.id).await?;
    assert_eq!(hidden, 2);
    assert!(repo.list_visible_by_user(friend.id).await?.is_empty());
    assert_eq!(repo.list_visible_by_user(owner.id).await?.len(), 1);

    // Hiding again touches nothing
    assert_eq!(repo.hide_for_user_on_map(map.id, friend.id).await?, 0);

    let restored = repo.restore_for_user_on_map(map.id, friend.id).await?;
    assert_eq!(restored, 2);
    assert_eq!(repo.list_visible_by_user(friend.id).await?.len(), 2);

    Ok(())
}
