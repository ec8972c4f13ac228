use super::*;

/// Tests removing a membership.
///
/// Verifies that only the given user's membership is removed.
///
/// Expected: Ok(1) and the membership no longer found
#[tokio::test]
async fn removes_single_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;

    let repo = MapParticipantRepository::new(db);
    let removed = repo.delete(map.id, friend.id).await?;

    assert_eq!(removed, 1);
    assert!(repo.find(map.id, friend.id).await?.is_none());
    assert!(repo.find(map.id, owner.id).await?.is_some());

    Ok(())
}

/// Tests removing a membership that does not exist.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_when_not_a_member() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let stranger = factory::create_user(db).await?;

    let removed = MapParticipantRepository::new(db)
        .delete(map.id, stranger.id)
        .await?;

    assert_eq!(removed, 0);

    Ok(())
}
