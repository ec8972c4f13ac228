use super::*;

/// Tests inviting a user and accepting the invitation.
///
/// Verifies that the invitee receives an `invite` notification carrying the map
/// id, and that accepting joins the map, restores the points the invitee left
/// hidden there, marks the invitation read and re-indexes the invitee.
///
/// Expected: Ok with membership, two restored points and a read invitation
#[tokio::test]
async fn accept_restores_points_and_marks_read() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let guest = factory::user::create_user_with_username(db, "marco").await?;
    factory::point::PointFactory::new(db, map.id, guest.id)
        .city("Venice")
        .country("Italy")
        .hidden(true)
        .build()
        .await?;
    factory::point::PointFactory::new(db, map.id, guest.id)
        .city("Hangzhou")
        .country("China")
        .hidden(true)
        .build()
        .await?;
    ranking.rebuild(db).await?;

    let service = MapService::new(db, &ranking);
    let invitation = service.invite(map.id, owner.id, " marco ").await?;
    assert_eq!(invitation.user_id, guest.id);
    assert_eq!(invitation.kind, "invite");
    assert_eq!(invitation.map_id(), Some(map.id));
    assert!(!invitation.read);

    let (participant, restored) = service
        .accept_invite(map.id, invitation.id, guest.id)
        .await?;
    assert_eq!(restored, 2);
    assert_eq!(participant.role, ParticipantRole::Collaborator);
    assert_eq!(participant.assigned_color, PARTICIPANT_COLORS[1]);
    assert_eq!(participant.username.as_deref(), Some("marco"));

    assert_eq!(
        PointRepository::new(db)
            .list_visible_by_user(guest.id)
            .await?
            .len(),
        2
    );

    let stored = NotificationRepository::new(db)
        .find_by_id(invitation.id)
        .await?
        .unwrap();
    assert!(stored.read);

    let board = ranking.leaderboard(Metric::UniqueCountries, 1).await?;
    assert_eq!(board[0].user_id, guest.id);
    assert_eq!(board[0].unique_countries, 2);

    Ok(())
}

/// Tests the checks made before an invitation is sent.
///
/// Expected: Forbidden for non-owners and personal maps, NotFound for unknown
/// usernames and BadRequest for self, members and repeated invitations
#[tokio::test]
async fn rejects_invalid_invitations() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let member = factory::user::create_user_with_username(db, "member").await?;
    factory::create_participant(db, map.id, member.id).await?;
    let outsider = factory::user::create_user_with_username(db, "outsider").await?;
    let personal = factory::map::MapFactory::new(db, owner.id)
        .map_type("Personal")
        .build()
        .await?;

    let service = MapService::new(db, &ranking);

    let result = service.invite(map.id, member.id, "outsider").await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let result = service.invite(personal.id, owner.id, "outsider").await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let result = service.invite(map.id, owner.id, "nobody").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = service.invite(map.id, owner.id, &owner.username).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service.invite(map.id, owner.id, "member").await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    service.invite(map.id, owner.id, "outsider").await?;
    let result = service.invite(map.id, owner.id, "outsider").await;
    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg.contains("pending")
    ));

    let unread = NotificationRepository::new(db)
        .get_by_user(outsider.id, true)
        .await?;
    assert_eq!(unread.len(), 1);

    Ok(())
}

/// Tests accepting with a notification that does not fit.
///
/// Verifies that another user's invitation is reported as missing and that an
/// invitation to a different map or a non-invite notification is rejected.
///
/// Expected: Err(NotFound) then Err(BadRequest) twice, and no membership
#[tokio::test]
async fn accept_requires_matching_invitation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let (other_map, _) = factory::helpers::create_map_for_user(db, &owner).await?;
    let guest = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;

    let service = MapService::new(db, &ranking);
    let invitation = service.invite(other_map.id, owner.id, &guest.username).await?;
    let unrelated = factory::create_notification(db, guest.id).await?;

    let result = service.accept_invite(other_map.id, invitation.id, stranger.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = service.accept_invite(map.id, invitation.id, guest.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service.accept_invite(map.id, unrelated.id, guest.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    assert!(MapParticipantRepository::new(db)
        .find(map.id, guest.id)
        .await?
        .is_none());

    Ok(())
}

/// Tests declining an invitation.
///
/// Expected: Ok with the invitation read and no membership created
#[tokio::test]
async fn decline_marks_read_without_joining() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let guest = factory::create_user(db).await?;

    let service = MapService::new(db, &ranking);
    let invitation = service.invite(map.id, owner.id, &guest.username).await?;

    service.decline_invite(map.id, invitation.id, guest.id).await?;

    let stored = NotificationRepository::new(db)
        .find_by_id(invitation.id)
        .await?
        .unwrap();
    assert!(stored.read);
    assert!(MapParticipantRepository::new(db)
        .find(map.id, guest.id)
        .await?
        .is_none());

    let result = service.decline_invite(map.id, invitation.id, owner.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
