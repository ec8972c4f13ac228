use super::*;

/// Tests creating a notification with a JSON payload.
///
/// Verifies that the payload is stored as text and parsed back into JSON.
///
/// Expected: Ok with unread notification and equal payload
#[tokio::test]
async fn creates_unread_notification_with_payload() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let payload = serde_json::json!({ "category": "cities", "level": 2 });

    let notification = NotificationRepository::new(db)
        .create(CreateNotificationParam {
            user_id: user.id,
            kind: KIND_ACHIEVEMENT,
            title: "Explorer: Wanderer".to_string(),
            message: "You reached 2 unique cities".to_string(),
            data: Some(payload.clone()),
        })
        .await?;

    assert_eq!(notification.kind, "achievement");
    assert!(!notification.read);
    assert_eq!(notification.data, Some(payload));

    Ok(())
}
