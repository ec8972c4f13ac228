use super::*;

/// Tests listing every user.
///
/// Verifies that users come back in id order regardless of username order.
///
/// Expected: Ok with users ordered by id
#[tokio::test]
async fn returns_users_in_id_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let zoe = factory::user::create_user_with_username(db, "zoe").await?;
    let anna = factory::user::create_user_with_username(db, "anna").await?;

    let users = UserRepository::new(db).get_all().await?;

    let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![zoe.id, anna.id]);

    Ok(())
}

/// Tests listing users on an empty table.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_when_no_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let users = UserRepository::new(db).get_all().await?;

    assert!(users.is_empty());

    Ok(())
}
