use super::*;

/// Tests resolving an existing user from the header.
///
/// Verifies that the AuthGuard loads the user whose id is carried by the
/// `x-user-id` header.
///
/// Expected: Ok(User) matching the created user
#[tokio::test]
async fn resolves_user_from_header() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("marco")
        .build()
        .await?;

    let headers = headers_with_user(&user.id.to_string());
    let result = AuthGuard::new(db, &headers).require().await;

    assert!(result.is_ok());
    let returned_user = result.unwrap();
    assert_eq!(returned_user.id, user.id);
    assert_eq!(returned_user.username, "marco");

    Ok(())
}

/// Tests a request without the user header.
///
/// Verifies that the AuthGuard rejects requests the upstream auth layer did
/// not tag with a user id.
///
/// Expected: Err(AuthError::MissingUserHeader)
#[tokio::test]
async fn rejects_missing_header() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = HeaderMap::new();
    let result = AuthGuard::new(db, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingUserHeader))
    ));

    Ok(())
}

/// Tests a header that is not an integer id.
///
/// Expected: Err(AuthError::InvalidUserHeader)
#[tokio::test]
async fn rejects_non_numeric_header() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = headers_with_user("not-a-number");
    let result = AuthGuard::new(db, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidUserHeader(value))) if value == "not-a-number"
    ));

    Ok(())
}

/// Tests a header naming a user that does not exist.
///
/// Verifies that a well-formed id is still rejected when no such user is
/// stored in the database.
///
/// Expected: Err(AuthError::UserNotFound)
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = headers_with_user("42");
    let result = AuthGuard::new(db, &headers).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotFound(42)))
    ));

    Ok(())
}
