//! Business logic handler

use std::collections::BTreeSet;
use std::sync::Arc;

use tienda_common::{Envelope, PageMeta, PagedEnvelope, Pagination};
use tienda_errors::{RpcError, RpcResult};
use tracing::info;

use crate::domain::{NewProduct, Product, ProductChanges, ProductFilter, ProductPatch, ProductStore};

/// 商品服务
///
/// 持有注入的仓储实例，调用之间不缓存任何状态。
/// 错误全部以 [`RpcError`] 返回，嵌套调用的状态码原样传播。
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// 创建商品
    pub async fn create(&self, input: NewProduct) -> RpcResult<Envelope<Product>> {
        info!(name = %input.name, "Creating product");

        let product = self.store.create(input).await?;

        info!(id = product.id, "Product created");
        Ok(Envelope::created(product))
    }

    /// 分页查询在售商品
    ///
    /// 请求超出最后一页不报错，返回空的 `data` 与照常计算的 `meta`。
    pub async fn find_all(&self, pagination: Pagination) -> RpcResult<PagedEnvelope<Product>> {
        let filter = ProductFilter::active();

        let total = self.store.count(&filter).await?;
        let meta = PageMeta::new(total, &pagination);
        let data = self.store.find_many(&filter, Some(&pagination)).await?;

        Ok(PagedEnvelope::ok(data, meta))
    }

    /// 查询单个在售商品
    pub async fn find_one(&self, id: i64) -> RpcResult<Envelope<Product>> {
        let product = self
            .store
            .find_first(&ProductFilter::active_id(id))
            .await?
            .ok_or_else(|| RpcError::not_found(format!("Product with id {id} not found")))?;

        Ok(Envelope::ok(product))
    }

    /// 更新商品
    ///
    /// 先经 `find_one` 确认存在且在售；载荷中的 `id` 字段被丢弃。
    pub async fn update(&self, id: i64, patch: ProductPatch) -> RpcResult<Envelope<Product>> {
        self.find_one(id).await?;

        info!(id, "Updating product");
        let product = self.store.update(id, patch.into_changes()).await?;

        Ok(Envelope::ok(product))
    }

    /// 软删除商品
    ///
    /// 记录不会被物理删除，仅置 `available = false`。对已删除的商品
    /// 再次调用会因内部 `find_one` 只查在售记录而返回 NotFound。
    pub async fn remove(&self, id: i64) -> RpcResult<Envelope<Product>> {
        self.find_one(id).await?;

        info!(id, "Removing product");
        let product = self.store.update(id, ProductChanges::deactivate()).await?;

        Ok(Envelope::ok(product))
    }

    /// 批量校验商品 ID
    ///
    /// 去重后按 ID 集合查询，不过滤 `available`。任何 ID 未命中即以
    /// `ReferenceIntegrity` 失败。返回原始记录供下游服务组装，不包装。
    pub async fn validate_ids(&self, ids: &[i64]) -> RpcResult<Vec<Product>> {
        let unique: Vec<i64> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        let products = self
            .store
            .find_many(&ProductFilter::by_ids(unique.clone()), None)
            .await?;

        if products.len() != unique.len() {
            return Err(RpcError::reference_integrity("Some products were not found"));
        }

        Ok(products)
    }
}
