//! 通用类型定义

use serde::{Deserialize, Serialize};

/// 所有成功响应使用的固定消息
pub const SUCCESS_MESSAGE: &str = "Successful execution";

/// 分页参数
///
/// `page` 和 `limit` 均为正整数，由上游校验。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// 分页元数据
///
/// 对外字段名固定为 `total` / `page` / `lastPage`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub last_page: u32,
}

impl PageMeta {
    /// 由总数和分页参数计算元数据，`last_page = ceil(total / limit)`
    pub fn new(total: u64, pagination: &Pagination) -> Self {
        Self {
            total,
            page: pagination.page,
            last_page: total.div_ceil(u64::from(pagination.limit)) as u32,
        }
    }
}

/// 统一成功响应包装
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(status: u16, data: T) -> Self {
        Self {
            status,
            message: SUCCESS_MESSAGE.to_string(),
            data,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(200, data)
    }

    pub fn created(data: T) -> Self {
        Self::new(201, data)
    }
}

/// 带分页元数据的成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedEnvelope<T> {
    pub status: u16,
    pub message: String,
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PagedEnvelope<T> {
    pub fn ok(data: Vec<T>, meta: PageMeta) -> Self {
        Self {
            status: 200,
            message: SUCCESS_MESSAGE.to_string(),
            data,
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 7).offset(), 14);
    }

    #[test]
    fn page_meta_rounds_last_page_up() {
        let meta = PageMeta::new(15, &Pagination::new(2, 10));
        assert_eq!(meta.total, 15);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.last_page, 2);

        assert_eq!(PageMeta::new(20, &Pagination::new(1, 10)).last_page, 2);
        assert_eq!(PageMeta::new(0, &Pagination::new(1, 10)).last_page, 0);
    }

    #[test]
    fn envelope_carries_fixed_message() {
        let created = Envelope::created(42);
        assert_eq!(created.status, 201);
        assert_eq!(created.message, SUCCESS_MESSAGE);
        assert_eq!(created.data, 42);

        let ok = Envelope::ok("x");
        assert_eq!(ok.status, 200);
        assert_eq!(ok.message, SUCCESS_MESSAGE);
    }

    #[test]
    fn paged_envelope_serializes_meta() {
        let page = PagedEnvelope::ok(vec![1, 2], PageMeta::new(2, &Pagination::default()));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["meta"]["total"], 2);
        assert_eq!(json["meta"]["lastPage"], 1);
    }
}
