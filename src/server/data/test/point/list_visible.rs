use super::*;

/// Tests listing a user's visible points across maps.
///
/// Verifies that hidden points and other users' points are excluded while
/// points on every map the user logged on are included.
///
/// Expected: Ok with only the user's visible points
#[tokio::test]
async fn lists_visible_points_of_user_across_maps() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, first_map, _) = factory::helpers::create_map_with_owner(db).await?;
    let (second_map, _) = factory::helpers::create_map_for_user(db, &user).await?;
    let other = factory::create_user(db).await?;

    let rome = factory::create_point(db, first_map.id, user.id, "Rome", "Italy", "Europe").await?;
    let cairo =
        factory::create_point(db, second_map.id, user.id, "Cairo", "Egypt", "Africa").await?;
    factory::point::PointFactory::new(db, first_map.id, user.id)
        .city("Oslo")
        .hidden(true)
        .build()
        .await?;
    factory::create_point(db, first_map.id, other.id, "Lima", "Peru", "South America").await?;

    let points = PointRepository::new(db).list_visible_by_user(user.id).await?;

    let ids: Vec<i32> = points.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![rome.id, cairo.id]);

    Ok(())
}

/// Tests listing visible points on one map.
///
/// Expected: Ok with every user's visible points on that map only
#[tokio::test]
async fn lists_visible_points_on_map() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let (other_map, _) = factory::helpers::create_map_for_user(db, &owner).await?;
    let friend = factory::create_user(db).await?;

    factory::create_point(db, map.id, owner.id, "Rome", "Italy", "Europe").await?;
    factory::create_point(db, map.id, friend.id, "Milan", "Italy", "Europe").await?;
    factory::point::PointFactory::new(db, map.id, friend.id)
        .hidden(true)
        .build()
        .await?;
    factory::create_point(db, other_map.id, owner.id, "Paris", "France", "Europe").await?;

    let repo = PointRepository::new(db);
    let on_map = repo.list_visible_by_map(map.id).await?;
    let everywhere = repo.list_all_visible().await?;

    assert_eq!(on_map.len(), 2);
    assert!(on_map.iter().all(|p| p.map_id == map.id));
    assert_eq!(everywhere.len(), 3);

    Ok(())
}
