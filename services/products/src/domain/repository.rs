//! 商品仓储接口

use async_trait::async_trait;
use tienda_common::Pagination;
use tienda_errors::RpcResult;

use crate::domain::product::{NewProduct, Product, ProductChanges, ProductFilter};

/// 商品仓储接口
///
/// 持久化协作方需要实现的最小 CRUD 面。所有方法都可能以
/// `RpcError::Database` 失败；隔离性与原子性由实现方保证，
/// 本层不做加锁与重试。
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 创建商品，`id` 与时间戳由存储分配
    async fn create(&self, fields: NewProduct) -> RpcResult<Product>;

    /// 统计命中条件的记录数
    async fn count(&self, filter: &ProductFilter) -> RpcResult<u64>;

    /// 按条件查询，`page` 为 None 时返回全部命中记录，按 id 升序
    async fn find_many(
        &self,
        filter: &ProductFilter,
        page: Option<&Pagination>,
    ) -> RpcResult<Vec<Product>>;

    /// 返回第一条命中记录
    async fn find_first(&self, filter: &ProductFilter) -> RpcResult<Option<Product>>;

    /// 按 `id` 应用部分更新，返回更新后的记录
    async fn update(&self, id: i64, changes: ProductChanges) -> RpcResult<Product>;
}
