use cosmorm::{
    ContainerInfo, CriteriaBuilder, CriteriaRepository, InstrumentedLauncher, LauncherConfig,
    MemoryLauncher, Op, Order, ProjectionPaginated, TotalCountResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
struct OrderRecord {
    id: String,
    amount: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct OrderView {
    id: String,
    cents: u64,
}

impl From<OrderRecord> for OrderView {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.id,
            cents: u64::from(order.amount) * 100,
        }
    }
}

fn orders() -> ContainerInfo<OrderRecord> {
    ContainerInfo::new("orders")
}

fn seeded(n: u32) -> MemoryLauncher {
    MemoryLauncher::new().with_container(
        "orders",
        (0..n).map(|i| json!({ "id": format!("order-{i}"), "amount": i })),
    )
}

#[tokio::test]
async fn find_paginated_walks_every_page() {
    let repo = CriteriaRepository::new(seeded(25));
    let mut b = CriteriaBuilder::new();
    b.condition(Op::MoreOrEqualsThan, "amount", [0]);
    b.order_by("amount", Order::Asc);
    let criteria = b.build().unwrap();

    let mut seen = Vec::new();
    for desired_page in 0.. {
        let page = repo
            .find_paginated(&criteria, desired_page, 10, &orders(), OrderView::from)
            .await
            .unwrap();
        assert_eq!(page.total_result, 25);
        assert_eq!(page.data[0].id, format!("order-{}", desired_page * 10));
        seen.extend(page.data.iter().map(|o| o.cents));
        if !page.has_next_page {
            break;
        }
    }
    assert_eq!(seen, (0..25).map(|i| i * 100).collect::<Vec<u64>>());

    // Three runs of the same query per page request.
    let launched = repo.launcher().launched_queries();
    assert_eq!(launched.len(), 9);
    assert!(launched.iter().all(|q| q == criteria.query_text()));
}

#[tokio::test]
async fn find_paginated_past_the_end() {
    let repo = CriteriaRepository::new(seeded(3));
    let criteria = CriteriaBuilder::new().build().unwrap();
    let page = repo
        .find_paginated(&criteria, 5, 10, &orders(), OrderView::from)
        .await
        .unwrap();
    assert_eq!(page, ProjectionPaginated::empty());
}

#[tokio::test]
async fn total_result_drains_every_page() {
    let repo = CriteriaRepository::new(seeded(31));
    let criteria = CriteriaBuilder::new().build().unwrap();
    assert_eq!(repo.total_result(&criteria, 7, &orders()).await.unwrap(), 31);
}

#[tokio::test]
async fn count_returns_the_store_record() {
    let launcher =
        MemoryLauncher::new().with_container("orders", [json!({ "id": "null", "totalCount": 7 })]);
    let repo = CriteriaRepository::new(launcher);

    let mut b = CriteriaBuilder::new();
    b.select_count();
    b.condition(Op::Equals, "status", ["paid"]);
    let criteria = b.build().unwrap();

    let response = repo.count(&criteria, "orders").await.unwrap();
    assert_eq!(response, TotalCountResponse::new(7));
    assert_eq!(
        repo.launcher().launched_queries(),
        vec!["SELECT COUNT(1) AS totalCount FROM c WHERE 1=1 AND c.status = 'paid'  "]
    );
}

#[tokio::test]
async fn count_defaults_to_zero() {
    let repo = CriteriaRepository::new(MemoryLauncher::new().with_container("orders", []));
    let mut b = CriteriaBuilder::new();
    b.select_count();
    let response = repo.count(&b.build().unwrap(), "orders").await.unwrap();
    assert_eq!(response, TotalCountResponse::default());
}

#[tokio::test]
async fn count_refuses_plain_criteria() {
    let repo = CriteriaRepository::new(seeded(2));
    let criteria = CriteriaBuilder::new().build().unwrap();
    let err = repo.count(&criteria, "orders").await.unwrap_err();
    assert!(err.is_builder_misuse());
    assert!(repo.launcher().launched_queries().is_empty());
}

#[tokio::test]
async fn executor_failures_surface() {
    let repo = CriteriaRepository::new(MemoryLauncher::new().failing("service unavailable"));
    let criteria = CriteriaBuilder::new().build().unwrap();
    let err = repo
        .find_paginated(&criteria, 0, 10, &orders(), OrderView::from)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("service unavailable"));
}

#[tokio::test]
async fn instrumented_launcher_times_out_slow_pages() {
    let slow = seeded(4).with_page_delay(Duration::from_millis(500));
    let launcher = InstrumentedLauncher::new(slow)
        .with_config(LauncherConfig::new().with_query_timeout(Duration::from_millis(20)));
    let repo = CriteriaRepository::new(launcher);
    let criteria = CriteriaBuilder::new().build().unwrap();

    let err = repo
        .find_paginated(&criteria, 0, 2, &orders(), OrderView::from)
        .await
        .unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn shared_launcher_serves_concurrent_requests() {
    let repo = Arc::new(CriteriaRepository::new(Arc::new(seeded(12))));
    let criteria = CriteriaBuilder::new().build().unwrap();

    let mut handles = Vec::new();
    for desired_page in 0..3 {
        let repo = Arc::clone(&repo);
        let criteria = criteria.clone();
        handles.push(tokio::spawn(async move {
            repo.find_paginated(&criteria, desired_page, 5, &orders(), |o: OrderRecord| o.amount)
                .await
        }));
    }

    let mut pages = Vec::new();
    for handle in handles {
        pages.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(pages[0].data, (0..5).collect::<Vec<_>>());
    assert_eq!(pages[1].data, (5..10).collect::<Vec<_>>());
    assert_eq!(pages[2].data, vec![10, 11]);
    assert!(pages.iter().all(|p| p.total_result == 12));
    assert!(!pages[2].has_next_page);
}
