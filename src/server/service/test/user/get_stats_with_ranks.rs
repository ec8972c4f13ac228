use super::*;

/// Tests the caller's statistics with competition ranks.
///
/// Verifies that users tied on a metric share a rank and the next user skips
/// ahead.
///
/// Expected: Ok with ranks 1 for the leaders and 3 for the trailing user
#[tokio::test]
async fn ties_share_rank() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (first, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let second = factory::create_user(db).await?;
    let third = factory::create_user(db).await?;

    for user in [&first, &second] {
        factory::create_point(db, map.id, user.id, "Rome", "Italy", "Europe").await?;
        factory::create_point(db, map.id, user.id, "Cairo", "Egypt", "Africa").await?;
    }
    factory::create_point(db, map.id, third.id, "Rome", "Italy", "Europe").await?;

    ranking.rebuild(db).await?;
    let service = UserService::new(db, &ranking);

    let (stats, ranks) = service.get_stats_with_ranks(second.id).await?;
    assert_eq!(stats.total_points, 2);
    assert_eq!(ranks.points, 1);
    assert_eq!(ranks.countries, 1);
    assert_eq!(ranks.continents, 1);

    let (stats, ranks) = service.get_stats_with_ranks(third.id).await?;
    assert_eq!(stats.total_points, 1);
    assert_eq!(ranks.points, 3);
    assert_eq!(ranks.continents, 3);

    Ok(())
}

/// Tests a public profile for an unknown user.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn profile_of_unknown_user_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_map_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let result = UserService::new(db, &ranking).get_profile(404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
