use super::*;

/// Tests registering a user.
///
/// Verifies that the user is stored and immediately appears on the leaderboard
/// with zero points.
///
/// Expected: Ok with the user indexed
#[tokio::test]
async fn registers_and_indexes_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let service = UserService::new(db, &ranking);
    let user = service
        .create_user(CreateUserParam {
            username: "  marco ".to_string(),
            email: "marco@example.com".to_string(),
            bio: Some("".to_string()),
        })
        .await?;

    assert_eq!(user.username, "marco");
    assert!(user.bio.is_none());

    let board = service.leaderboard(Metric::TotalPoints, 10).await?;
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].username, "marco");
    assert_eq!(board[0].total_points, 0);

    Ok(())
}

/// Tests registering with a taken username.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_taken_username() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    factory::user::create_user_with_username(db, "marco").await?;

    let result = UserService::new(db, &ranking)
        .create_user(CreateUserParam {
            username: "marco".to_string(),
            email: "new@example.com".to_string(),
            bio: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Username already taken"));

    Ok(())
}

/// Tests registering with a taken email.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_taken_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    factory::user::UserFactory::new(db)
        .email("marco@example.com")
        .build()
        .await?;

    let result = UserService::new(db, &ranking)
        .create_user(CreateUserParam {
            username: "marco".to_string(),
            email: "marco@example.com".to_string(),
            bio: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
