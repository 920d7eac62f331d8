//! In-memory repository implementation
//!
//! 供测试与本地开发使用，过滤与排序语义和 PostgreSQL 实现一致。

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tienda_common::Pagination;
use tienda_errors::{RpcError, RpcResult};

use crate::domain::{NewProduct, Product, ProductChanges, ProductFilter, ProductStore};

/// 基于 BTreeMap 的商品仓储
#[derive(Default)]
pub struct InMemoryProductStore {
    products: Mutex<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RpcResult<std::sync::MutexGuard<'_, BTreeMap<i64, Product>>> {
        self.products
            .lock()
            .map_err(|_| RpcError::internal("product store lock poisoned"))
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, fields: NewProduct) -> RpcResult<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let product = Product {
            id,
            name: fields.name,
            price: fields.price,
            available: true,
            created_at: now,
            updated_at: now,
        };

        self.lock()?.insert(id, product.clone());
        Ok(product)
    }

    async fn count(&self, filter: &ProductFilter) -> RpcResult<u64> {
        let products = self.lock()?;
        Ok(products.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn find_many(
        &self,
        filter: &ProductFilter,
        page: Option<&Pagination>,
    ) -> RpcResult<Vec<Product>> {
        let products = self.lock()?;
        let matching = products.values().filter(|p| filter.matches(p)).cloned();

        // BTreeMap 迭代天然按 id 升序
        let result = match page {
            Some(page) => matching
                .skip(page.offset() as usize)
                .take(page.limit as usize)
                .collect(),
            None => matching.collect(),
        };

        Ok(result)
    }

    async fn find_first(&self, filter: &ProductFilter) -> RpcResult<Option<Product>> {
        let products = self.lock()?;
        Ok(products.values().find(|p| filter.matches(p)).cloned())
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> RpcResult<Product> {
        let mut products = self.lock()?;
        let product = products
            .get_mut(&id)
            .ok_or_else(|| RpcError::database(format!("Record to update not found: {}", id)))?;

        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(available) = changes.available {
            product.available = available;
        }
        product.updated_at = Utc::now();

        Ok(product.clone())
    }
}
