//! tienda-errors - 统一错误处理
//!
//! 服务边界上的失败统一为 `{message, status}` 结构的远程错误。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 远程过程调用错误类型
///
/// 每个变体自带状态码，嵌套调用通过 `?` 传播时状态不会被覆盖。
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ReferenceIntegrity(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RpcError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn reference_integrity(msg: impl Into<String>) -> Self {
        Self::ReferenceIntegrity(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::ReferenceIntegrity(_) => 502,
            Self::Database(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::ReferenceIntegrity(_) => tonic::Code::Unavailable,
            Self::Database(_) => tonic::Code::Internal,
            Self::Internal(_) => tonic::Code::Internal,
        }
    }

    /// 转换为边界上的序列化结构
    pub fn to_remote(&self) -> RemoteError {
        RemoteError {
            message: self.to_string(),
            status: self.status_code(),
        }
    }
}

impl From<RpcError> for tonic::Status {
    fn from(err: RpcError) -> Self {
        tonic::Status::new(err.grpc_code(), err.to_string())
    }
}

/// 跨服务边界传递的错误载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteError {
    pub message: String,
    pub status: u16,
}

/// Result 类型别名
pub type RpcResult<T> = Result<T, RpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(RpcError::not_found("x").status_code(), 404);
        assert_eq!(RpcError::reference_integrity("x").status_code(), 502);
        assert_eq!(RpcError::database("x").status_code(), 500);
        assert_eq!(RpcError::internal("x").status_code(), 500);
    }

    #[test]
    fn grpc_codes_follow_taxonomy() {
        assert_eq!(RpcError::not_found("x").grpc_code(), tonic::Code::NotFound);
        assert_eq!(
            RpcError::reference_integrity("x").grpc_code(),
            tonic::Code::Unavailable
        );
        assert_eq!(RpcError::database("x").grpc_code(), tonic::Code::Internal);
    }

    #[test]
    fn converts_to_tonic_status() {
        let status: tonic::Status = RpcError::not_found("Product with id 7 not found").into();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "Product with id 7 not found");
    }

    #[test]
    fn remote_error_serializes_message_and_status() {
        let remote = RpcError::reference_integrity("Some products were not found").to_remote();
        let json = serde_json::to_value(&remote).unwrap();
        assert_eq!(json["status"], 502);
        assert_eq!(json["message"], "Some products were not found");
    }
}
