use super::*;

/// Tests participants changing colors.
///
/// Verifies that a participant may recolor themselves, the owner may recolor
/// anyone, and the stored color is normalised to upper case.
///
/// Expected: Ok with the new colors stored
#[tokio::test]
async fn self_and_owner_can_change_color() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;

    let service = MapService::new(db, &ranking);
    let participant_repo = MapParticipantRepository::new(db);

    let color = service
        .update_color(map.id, friend.id, friend.id, "#a855f7")
        .await?;
    assert_eq!(color, "#A855F7");
    assert_eq!(
        participant_repo.find(map.id, friend.id).await?.unwrap().assigned_color,
        "#A855F7"
    );

    service
        .update_color(map.id, owner.id, friend.id, "#14B8A6")
        .await?;
    assert_eq!(
        participant_repo.find(map.id, friend.id).await?.unwrap().assigned_color,
        "#14B8A6"
    );

    Ok(())
}

/// Tests color changes that must be refused.
///
/// Expected: Forbidden for another participant's color, BadRequest for a
/// malformed color and NotFound for a non-participant
#[tokio::test]
async fn rejects_invalid_color_changes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, membership) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_participant(db, map.id, friend.id).await?;
    let stranger = factory::create_user(db).await?;

    let service = MapService::new(db, &ranking);

    let result = service
        .update_color(map.id, friend.id, owner.id, "#14B8A6")
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let result = service.update_color(map.id, friend.id, friend.id, "teal").await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service
        .update_color(map.id, owner.id, stranger.id, "#14B8A6")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert_eq!(
        MapParticipantRepository::new(db)
            .find(map.id, owner.id)
            .await?
            .unwrap()
            .assigned_color,
        membership.assigned_color
    );

    Ok(())
}
