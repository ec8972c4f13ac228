use super::*;

/// Tests rebuilding the index from the database.
///
/// Verifies that every user gets an entry, including users without points, and
/// that hidden points do not count.
///
/// Expected: Ok(3) with the leaderboard ordered by visible points
#[tokio::test]
async fn indexes_every_user_from_visible_points() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    let idle = factory::create_user(db).await?;

    factory::create_point(db, map.id, owner.id, "Rome", "Italy", "Europe").await?;
    factory::create_point(db, map.id, friend.id, "Cairo", "Egypt", "Africa").await?;
    factory::create_point(db, map.id, friend.id, "Lima", "Peru", "South America").await?;
    factory::point::PointFactory::new(db, map.id, owner.id)
        .city("Oslo")
        .hidden(true)
        .build()
        .await?;

    let index = RankingIndex::new();
    let count = index.rebuild(db).await?;

    assert_eq!(count, 3);

    let board = index.leaderboard(Metric::TotalPoints, 10).await?;
    let rows: Vec<(i32, usize)> = board.iter().map(|e| (e.user_id, e.total_points)).collect();
    assert_eq!(rows, vec![(friend.id, 2), (owner.id, 1), (idle.id, 0)]);

    let continents = index.leaderboard(Metric::UniqueContinents, 1).await?;
    assert_eq!(continents[0].user_id, friend.id);
    assert_eq!(continents[0].unique_continents, 2);

    Ok(())
}

/// Tests rebuilding an empty database.
///
/// Expected: Ok(0) with an empty leaderboard
#[tokio::test]
async fn rebuilds_empty_index() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let index = RankingIndex::new();

    assert_eq!(index.rebuild(db).await?, 0);
    assert!(index.leaderboard(Metric::TotalPoints, 50).await?.is_empty());

    Ok(())
}
