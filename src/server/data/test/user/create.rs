use super::*;

/// Tests creating a new user.
///
/// Verifies that the user repository inserts a user with the given username,
/// email and bio and assigns it an id.
///
/// Expected: Ok with the stored fields returned
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParam {
            username: "marco".to_string(),
            email: "marco@example.com".to_string(),
            bio: Some("Always travelling".to_string()),
        })
        .await?;

    assert!(user.id > 0);
    assert_eq!(user.username, "marco");
    assert_eq!(user.email, "marco@example.com");
    assert_eq!(user.bio.as_deref(), Some("Always travelling"));

    let found = repo.find_by_username("marco").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests the unique username constraint.
///
/// Expected: Err when inserting a second user with the same username
#[tokio::test]
async fn fails_for_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user_with_username(db, "marco").await?;

    let repo = UserRepository::new(db);
    let result = repo
        .create(CreateUserParam {
            username: "marco".to_string(),
            email: "other@example.com".to_string(),
            bio: None,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
