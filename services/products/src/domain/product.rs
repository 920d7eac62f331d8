//! 商品实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 商品实体
///
/// `available` 是软删除标记：记录从不物理删除，删除即 `available = false`。
/// `id` 与时间戳由存储层分配，`id` 创建后不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建商品的输入字段
///
/// 字段校验（非空名称、非负价格等）由上游 DTO 层完成。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// 更新商品的外部载荷
///
/// 可能携带 `id` 字段；`id` 不可变，转换为 [`ProductChanges`] 时被丢弃。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ProductPatch {
    /// 丢弃 `id`，保留可写字段
    pub fn into_changes(self) -> ProductChanges {
        let ProductPatch { id: _, name, price } = self;
        ProductChanges {
            name,
            price,
            available: None,
        }
    }
}

/// 存储层的部分更新字段，结构上不含 `id`
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

impl ProductChanges {
    /// 软删除：仅翻转 `available`
    pub fn deactivate() -> Self {
        Self {
            available: Some(false),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.available.is_none()
    }
}

/// 商品查询条件
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub id: Option<i64>,
    pub ids: Option<Vec<i64>>,
    pub available: Option<bool>,
}

impl ProductFilter {
    /// 所有在售商品
    pub fn active() -> Self {
        Self {
            available: Some(true),
            ..Default::default()
        }
    }

    /// 指定 ID 的在售商品
    pub fn active_id(id: i64) -> Self {
        Self {
            id: Some(id),
            available: Some(true),
            ..Default::default()
        }
    }

    /// ID 集合，不过滤 `available`（软删除的商品仍是合法引用）
    pub fn by_ids(ids: Vec<i64>) -> Self {
        Self {
            ids: Some(ids),
            ..Default::default()
        }
    }

    /// 判断单个商品是否命中条件
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(id) = self.id {
            if product.id != id {
                return false;
            }
        }
        if let Some(ids) = &self.ids {
            if !ids.contains(&product.id) {
                return false;
            }
        }
        if let Some(available) = self.available {
            if product.available != available {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, available: bool) -> Product {
        Product {
            id,
            name: format!("p{id}"),
            price: 1.0,
            available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn patch_strips_id() {
        let patch = ProductPatch {
            id: Some(999),
            name: None,
            price: Some(50.0),
        };
        let changes = patch.into_changes();
        assert_eq!(changes.price, Some(50.0));
        assert!(changes.name.is_none());
        assert!(changes.available.is_none());
    }

    #[test]
    fn deactivate_only_touches_available() {
        let changes = ProductChanges::deactivate();
        assert_eq!(changes.available, Some(false));
        assert!(changes.name.is_none());
        assert!(changes.price.is_none());
    }

    #[test]
    fn active_filter_excludes_soft_deleted() {
        let filter = ProductFilter::active();
        assert!(filter.matches(&product(1, true)));
        assert!(!filter.matches(&product(1, false)));
    }

    #[test]
    fn ids_filter_ignores_availability() {
        let filter = ProductFilter::by_ids(vec![1, 3]);
        assert!(filter.matches(&product(1, false)));
        assert!(filter.matches(&product(3, true)));
        assert!(!filter.matches(&product(2, true)));
    }

    #[test]
    fn product_serializes_camel_case() {
        let json = serde_json::to_value(product(1, true)).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
