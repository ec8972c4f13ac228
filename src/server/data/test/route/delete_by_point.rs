use super::*;

/// Tests deleting the routes attached to a point.
///
/// Verifies that routes starting or ending at the point are removed while an
/// unrelated route on the same map stays.
///
/// Expected: Ok with two rows removed and one route left
#[tokio::test]
async fn removes_routes_at_either_end() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let a = factory::create_point(db, map.id, user.id, "Cork", "Ireland", "Europe").await?;
    let b = factory::create_point(db, map.id, user.id, "Galway", "Ireland", "Europe").await?;
    let c = factory::create_point(db, map.id, user.id, "Sligo", "Ireland", "Europe").await?;
    let d = factory::create_point(db, map.id, user.id, "Derry", "Ireland", "Europe").await?;
    factory::create_route(db, map.id, user.id, a.id, b.id).await?;
    factory::create_route(db, map.id, user.id, c.id, a.id).await?;
    let kept = factory::create_route(db, map.id, user.id, c.id, d.id).await?;

    let repo = RouteRepository::new(db);
    assert_eq!(repo.delete_by_point(a.id).await?, 2);

    let remaining = repo.get_by_map(map.id).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);

    Ok(())
}
