use super::*;

/// Tests counting unread and total notifications.
///
/// Expected: Ok with counts limited to the given user
#[tokio::test]
async fn counts_unread_and_total() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::create_notification(db, user.id).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .read(true)
        .build()
        .await?;
    factory::create_notification(db, other.id).await?;

    let counts = NotificationRepository::new(db).counts(user.id).await?;

    assert_eq!(counts, NotificationCounts { unread: 2, total: 3 });

    Ok(())
}
