//! 商品服务端到端流程测试（内存仓储）

use std::sync::Arc;

use tienda_common::{Pagination, SUCCESS_MESSAGE};
use tienda_errors::RpcError;
use tienda_products::infrastructure::persistence::InMemoryProductStore;
use tienda_products::{NewProduct, ProductPatch, ProductService};

fn service() -> ProductService {
    tienda_telemetry::try_init_tracing("debug");
    ProductService::new(Arc::new(InMemoryProductStore::new()))
}

#[tokio::test]
async fn full_product_lifecycle() {
    let service = service();

    // 创建
    let created = service
        .create(NewProduct {
            name: "Monitor".to_string(),
            price: 120.0,
        })
        .await
        .unwrap();
    assert_eq!(created.status, 201);
    assert_eq!(created.message, SUCCESS_MESSAGE);
    let id = created.data.id;

    // 查询
    let found = service.find_one(id).await.unwrap();
    assert_eq!(found.data.name, "Monitor");

    // 更新（部分字段）
    let updated = service
        .update(
            id,
            ProductPatch {
                price: Some(99.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.data.price, 99.5);
    assert_eq!(updated.data.name, "Monitor");
    assert!(updated.data.updated_at >= updated.data.created_at);

    // 软删除
    let removed = service.remove(id).await.unwrap();
    assert!(!removed.data.available);

    // 删除后查询与再次删除均为 NotFound
    assert!(matches!(
        service.find_one(id).await.unwrap_err(),
        RpcError::NotFound(_)
    ));
    assert!(matches!(
        service.remove(id).await.unwrap_err(),
        RpcError::NotFound(_)
    ));
}

#[tokio::test]
async fn pagination_walks_all_active_records() {
    let service = service();

    for i in 0..25 {
        service
            .create(NewProduct {
                name: format!("item-{i}"),
                price: i as f64,
            })
            .await
            .unwrap();
    }

    let mut seen = Vec::new();
    let mut page = 1;
    loop {
        let result = service.find_all(Pagination::new(page, 10)).await.unwrap();
        if result.data.is_empty() {
            break;
        }
        seen.extend(result.data.into_iter().map(|p| p.id));
        assert_eq!(result.meta.total, 25);
        assert_eq!(result.meta.last_page, 3);
        page += 1;
    }

    assert_eq!(seen.len(), 25);
    let mut sorted = seen.clone();
    sorted.sort_unstable();
    assert_eq!(seen, sorted, "pages are ordered by id");
}

#[tokio::test]
async fn validate_ids_feeds_downstream_composition() {
    let service = service();

    let a = service
        .create(NewProduct {
            name: "a".to_string(),
            price: 1.0,
        })
        .await
        .unwrap()
        .data
        .id;
    let b = service
        .create(NewProduct {
            name: "b".to_string(),
            price: 2.0,
        })
        .await
        .unwrap()
        .data
        .id;

    // 软删除的商品仍可被引用
    service.remove(a).await.unwrap();

    let products = service.validate_ids(&[b, a, b]).await.unwrap();
    assert_eq!(products.len(), 2);

    // 未知 ID 以 502 报告，翻译为远程错误后结构为 {message, status}
    let err = service.validate_ids(&[a, b, 404404]).await.unwrap_err();
    let remote = err.to_remote();
    assert_eq!(remote.status, 502);
    assert_eq!(remote.message, "Some products were not found");
}
