use super::*;

/// Tests paging through a map's points.
///
/// Verifies that totals cover the whole listing while each page holds at most
/// `limit` items, and that hidden points are left out.
///
/// Expected: Ok with 5 visible points over 3 pages
#[tokio::test]
async fn pages_visible_points() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;
    for city in ["Bergen", "Oslo", "Tromso", "Bodo", "Alta"] {
        factory::create_point(db, map.id, user.id, city, "Norway", "Europe").await?;
    }
    factory::point::PointFactory::new(db, map.id, user.id)
        .city("Hidden")
        .hidden(true)
        .build()
        .await?;

    let service = PointService::new(db, &ranking);

    let first = service
        .list_page(page(map.id, 1, 2, PointSort::City, false), user.id)
        .await?;
    assert_eq!(first.total, 5);
    assert_eq!(first.pages(), 3);
    let cities: Vec<_> = first.items.iter().map(|p| p.city.as_deref()).collect();
    assert_eq!(cities, vec![Some("Alta"), Some("Bergen")]);

    let last = service
        .list_page(page(map.id, 3, 2, PointSort::City, false), user.id)
        .await?;
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].city.as_deref(), Some("Tromso"));

    Ok(())
}

/// Tests searching and filtering.
///
/// Verifies that search matches any of the text columns regardless of case
/// and that exact filters narrow the results.
///
/// Expected: Ok with the matching points only
#[tokio::test]
async fn searches_and_filters() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (user, map, _) = factory::helpers::create_map_with_owner(db).await?;
    factory::point::PointFactory::new(db, map.id, user.id)
        .city("Lisbon")
        .country("Portugal")
        .category("food")
        .build()
        .await?;
    factory::point::PointFactory::new(db, map.id, user.id)
        .city("Porto")
        .country("Portugal")
        .category("museum")
        .build()
        .await?;
    factory::point::PointFactory::new(db, map.id, user.id)
        .city("Seville")
        .country("Spain")
        .category("food")
        .build()
        .await?;

    let service = PointService::new(db, &ranking);

    let found = service
        .list_page(
            PointPageParam {
                search: Some("portu".to_string()),
                ..page(map.id, 1, 20, PointSort::City, false)
            },
            user.id,
        )
        .await?;
    assert_eq!(found.total, 2);

    let found = service
        .list_page(
            PointPageParam {
                country: Some("Portugal".to_string()),
                category: Some("food".to_string()),
                ..page(map.id, 1, 20, PointSort::Timestamp, true)
            },
            user.id,
        )
        .await?;
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].city.as_deref(), Some("Lisbon"));

    Ok(())
}

/// Tests paging a map the caller cannot see.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn requires_map_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let ranking = RankingIndex::new();

    let (_, map, _) = factory::helpers::create_map_with_owner(db).await?;
    let stranger = factory::create_user(db).await?;

    let result = PointService::new(db, &ranking)
        .list_page(page(map.id, 1, 20, PointSort::Timestamp, true), stranger.id)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}
