use super::*;

/// Tests listing notifications newest first.
///
/// Expected: Ok with the most recently created notification first
#[tokio::test]
async fn returns_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let first = factory::create_notification(db, user.id).await?;
    let second = factory::create_notification(db, user.id).await?;

    let notifications = NotificationRepository::new(db)
        .get_by_user(user.id, false)
        .await?;

    let ids: Vec<i32> = notifications.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    Ok(())
}

/// Tests filtering to unread notifications.
///
/// Verifies that read notifications and other users' notifications are excluded.
///
/// Expected: Ok with the single unread notification
#[tokio::test]
async fn filters_unread_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let unread = factory::create_notification(db, user.id).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .read(true)
        .build()
        .await?;
    factory::create_notification(db, other.id).await?;

    let notifications = NotificationRepository::new(db)
        .get_by_user(user.id, true)
        .await?;

    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].id, unread.id);

    Ok(())
}

/// Tests a stored payload that is not valid JSON.
///
/// Expected: Ok with the raw payload wrapped in an object
#[tokio::test]
async fn wraps_invalid_payload() -> Result<(), DbErr> {
    use sea_orm::{ActiveModelTrait, ActiveValue};

    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let model = factory::create_notification(db, user.id).await?;
    let mut active: entity::notification::ActiveModel = model.into();
    active.data = ActiveValue::Set(Some("not json".to_string()));
    active.update(db).await?;

    let notifications = NotificationRepository::new(db)
        .get_by_user(user.id, false)
        .await?;

    assert_eq!(
        notifications[0].data,
        Some(serde_json::json!({ "raw": "not json" }))
    );

    Ok(())
}
