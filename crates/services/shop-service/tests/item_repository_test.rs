//! Item repository integration tests against in-memory SQLite.

mod support;

use sea_orm::ConnectionTrait;

use common::{AppError, PageRequest};
use domain::{Item, ItemSellStatus};

use shop_service::infra::{Persistence, UnitOfWork};
use shop_service::repository::{ItemOrder, ItemRepository, ItemSearch};
use shop_service::seed::{mixed_sample_items, sample_item, sample_items};
use shop_service::with_rollback;

use support::{prices, save_all, setup_database, setup_persistence, sorted_ids, test_auditor};

#[tokio::test]
async fn test_save_assigns_id_and_round_trips() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        let saved = repo.save(sample_item(1, ItemSellStatus::Sell)).await?;

        let id = saved.id.expect("saved item has an id");
        let found = repo.find_by_id(id).await?.expect("item is readable");

        assert_eq!(found.id, Some(id));
        assert_eq!(found.name, "Test Item1");
        assert_eq!(found.price, 10001);
        assert_eq!(found.detail, "Test Item Detail1");
        assert_eq!(found.sell_status, ItemSellStatus::Sell);
        assert_eq!(found.stock_number, 100);
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_save_with_id_updates_in_place() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        let saved = repo.save(sample_item(1, ItemSellStatus::Sell)).await?;

        let updated = repo
            .save(Item {
                price: 9000,
                sell_status: ItemSellStatus::SoldOut,
                stock_number: 0,
                ..saved.clone()
            })
            .await?;

        assert_eq!(updated.id, saved.id);
        assert_eq!(repo.count().await?, 1);

        let found = repo.find_by_id(saved.id.unwrap()).await?.unwrap();
        assert_eq!(found.price, 9000);
        assert_eq!(found.sell_status, ItemSellStatus::SoldOut);
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_save_with_unknown_id_is_not_found() {
    let uow = setup_persistence().await;

    let result = with_rollback!(uow, |ctx| {
        let ghost = Item {
            id: Some(999),
            ..sample_item(1, ItemSellStatus::Sell)
        };
        ctx.items().save(ghost).await
    });

    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_find_by_id_miss_is_none() {
    let uow = setup_persistence().await;

    let found = uow.items().find_by_id(12345).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_by_name_is_exact() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, sample_items(10)).await?;

        // "Test Item10" shares the prefix but must not match
        let items = repo.find_by_name("Test Item1").await?;
        assert_eq!(items.len(), 1);
        assert!(items.iter().all(|item| item.name == "Test Item1"));

        assert!(repo.find_by_name("Test Item").await?.is_empty());
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_find_by_name_or_detail_matches_either_side() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, sample_items(10)).await?;

        let mut items = repo
            .find_by_name_or_detail("Test Item1", "Test Item Detail5")
            .await?;
        items.sort_by_key(|item| item.price);

        assert_eq!(prices(&items), vec![10001, 10005]);
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_find_by_price_less_than() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, sample_items(10)).await?;

        let items = repo.find_by_price_less_than(10005).await?;

        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| item.price < 10005));
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_find_by_price_less_than_order_by_price_desc() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, sample_items(10)).await?;

        let items = repo
            .find_by_price_less_than_order_by_price_desc(10005)
            .await?;
        assert_eq!(prices(&items), vec![10004, 10003, 10002, 10001]);

        let unordered = repo.find_by_price_less_than(10005).await?;
        assert_eq!(sorted_ids(&items), sorted_ids(&unordered));
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_find_by_item_detail_orders_by_price_desc() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, sample_items(10)).await?;

        let items = repo.find_by_item_detail("Test Item Detail").await?;
        assert_eq!(items.len(), 10);
        assert!(items.windows(2).all(|pair| pair[0].price >= pair[1].price));

        let single = repo.find_by_item_detail("Detail7").await?;
        assert_eq!(prices(&single), vec![10007]);
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_native_detail_query_matches_query_builder() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, sample_items(10)).await?;

        for needle in ["Test Item Detail", "Detail1", "nothing like this"] {
            let built = repo.find_by_item_detail(needle).await?;
            let native = repo.find_by_item_detail_native(needle).await?;

            assert_eq!(sorted_ids(&built), sorted_ids(&native), "needle {}", needle);
            assert_eq!(prices(&built), prices(&native), "needle {}", needle);
        }
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_detail_search_matches_wildcards_literally() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        let cotton = Item::new("Shirt", 3000, "100% cotton", ItemSellStatus::Sell, 5);
        let blend = Item::new("Shirt", 2000, "1000 blend", ItemSellStatus::Sell, 5);
        let snake = Item::new("Mug", 1000, "snake_case mug", ItemSellStatus::Sell, 5);
        let spaced = Item::new("Cup", 500, "snake case cup", ItemSellStatus::Sell, 5);
        save_all(&repo, vec![cotton, blend, snake, spaced]).await?;

        assert_eq!(prices(&repo.find_by_item_detail("0%").await?), vec![3000]);
        assert_eq!(
            prices(&repo.find_by_item_detail_native("0%").await?),
            vec![3000]
        );
        assert_eq!(prices(&repo.find_by_item_detail("e_c").await?), vec![1000]);
        assert_eq!(
            prices(&repo.find_by_item_detail_native("e_c").await?),
            vec![1000]
        );
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_dynamic_search_combines_predicates() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        // 10001..=10005 on sale, 10006..=10010 sold out
        save_all(&repo, mixed_sample_items(5, 5)).await?;

        let search = ItemSearch::new()
            .detail_contains("Test Item Detail")
            .price_gt(10003)
            .sell_status(ItemSellStatus::Sell);
        let page = repo.find_all(&search, &PageRequest::of(0, 5)).await?;

        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
        let mut found = prices(&page.content);
        found.sort_unstable();
        assert_eq!(found, vec![10004, 10005]);
        assert!(page
            .content
            .iter()
            .all(|item| item.sell_status == ItemSellStatus::Sell));
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_dynamic_search_paginates() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, sample_items(10)).await?;

        let search = ItemSearch::new()
            .detail_contains("Test Item Detail")
            .sell_status(ItemSellStatus::Sell)
            .order_by(ItemOrder::PriceDesc);

        let first = repo.find_all(&search, &PageRequest::of(0, 5)).await?;
        assert_eq!(first.total_elements, 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.number_of_elements(), 5);
        assert!(first.has_next());
        assert_eq!(prices(&first.content), vec![10010, 10009, 10008, 10007, 10006]);

        let second = repo
            .find_all(&search, &PageRequest::of(0, 5).next())
            .await?;
        assert_eq!(second.total_elements, 10);
        assert!(second.is_last());
        assert_eq!(prices(&second.content), vec![10005, 10004, 10003, 10002, 10001]);

        let beyond = repo.find_all(&search, &PageRequest::of(2, 5)).await?;
        assert_eq!(beyond.total_elements, 10);
        assert!(beyond.content.is_empty());
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_dynamic_search_huge_page_index_is_empty() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, sample_items(10)).await?;

        let search = ItemSearch::new();
        for request in [PageRequest::of(u64::MAX / 2, 5), PageRequest::of(1 << 63, 1)] {
            let page = repo.find_all(&search, &request).await?;
            assert_eq!(page.total_elements, 10);
            assert!(page.content.is_empty());
            assert!(!page.has_next());
        }
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_empty_search_matches_everything() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, mixed_sample_items(3, 2)).await?;

        let search = ItemSearch::new().order_by(ItemOrder::IdAsc);
        let all = repo.search(&search).await?;

        assert_eq!(all.len(), 5);
        assert_eq!(repo.count().await?, 5);
        assert_eq!(prices(&all), vec![10001, 10002, 10003, 10004, 10005]);
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_search_by_sold_out_status() {
    let uow = setup_persistence().await;

    with_rollback!(uow, |ctx| {
        let repo = ctx.items();
        save_all(&repo, mixed_sample_items(5, 5)).await?;

        let search = ItemSearch::new()
            .sell_status(ItemSellStatus::SoldOut)
            .price_lt(10008)
            .order_by(ItemOrder::PriceAsc);
        let items = repo.search(&search).await?;

        assert_eq!(prices(&items), vec![10006, 10007]);
        assert!(items.iter().all(|item| !item.is_in_stock()));
        Ok(())
    })
    .unwrap();
}

#[tokio::test]
async fn test_unknown_stored_sell_status_is_internal_error() {
    let db = setup_database().await;
    db.get_connection()
        .execute_unprepared(
            "INSERT INTO item (item_nm, price, item_detail, item_sell_status, stock_number, reg_time, update_time) \
             VALUES ('Test Item1', 10001, 'Test Item Detail1', 'ON_HOLD', 1, '2024-01-01T00:00:00+00:00', '2024-01-01T00:00:00+00:00')",
        )
        .await
        .unwrap();
    let uow = Persistence::new(db.get_connection(), test_auditor());

    let result = uow.items().find_by_id(1).await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}
