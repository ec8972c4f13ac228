use super::*;

/// Tests refreshing a single user after their points change.
///
/// Verifies that the refreshed entry replaces the stale one and that ranks
/// follow.
///
/// Expected: Ok(Some) with updated statistics and rank
#[tokio::test]
async fn replaces_stale_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let friend = factory::create_user(db).await?;
    factory::create_point(db, map.id, friend.id, "Cairo", "Egypt", "Africa").await?;

    let index = RankingIndex::new();
    index.rebuild(db).await?;

    factory::create_point(db, map.id, owner.id, "Rome", "Italy", "Europe").await?;
    factory::create_point(db, map.id, owner.id, "Paris", "France", "Europe").await?;

    let stats = index.refresh_user(db, owner.id).await?.unwrap();

    assert_eq!(stats.total_points, 2);
    assert_eq!(stats.countries.count(), 2);
    assert_eq!(index.global_ranks(&stats).await.points, 1);

    let board = index.leaderboard(Metric::TotalPoints, 1).await?;
    assert_eq!(board[0].user_id, owner.id);

    Ok(())
}

/// Tests refreshing a user that does not exist.
///
/// Expected: Ok(None) and nothing indexed
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let index = RankingIndex::new();

    assert!(index.refresh_user(db, 404).await?.is_none());
    assert!(index.leaderboard(Metric::TotalPoints, 10).await?.is_empty());

    Ok(())
}
