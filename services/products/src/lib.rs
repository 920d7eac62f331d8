//! tienda-products - 商品微服务核心
//!
//! 商品实体的创建 / 分页查询 / 更新 / 软删除 / 批量 ID 校验。
//! 传输层由外部协作方挂载，持久化通过 [`domain::ProductStore`] 注入。

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ProductService;
pub use domain::{NewProduct, Product, ProductChanges, ProductFilter, ProductPatch, ProductStore};
