//! PostgreSQL repository implementation

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tienda_adapter_postgres::{PostgresConfig, check_connection, create_pool};
use tienda_common::Pagination;
use tienda_config::DatabaseConfig;
use tienda_errors::{RpcError, RpcResult};

use crate::domain::{NewProduct, Product, ProductChanges, ProductFilter, ProductStore};

use super::rows::ProductRow;

const PRODUCT_COLUMNS: &str = "id, name, price, available, created_at, updated_at";

/// 基于 PostgreSQL 的商品仓储
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 启动时建立连接池并验证连通性
    ///
    /// 连接池随本实例存活，Drop 时释放。
    pub async fn connect(config: &DatabaseConfig) -> RpcResult<Self> {
        let pool = create_pool(
            &PostgresConfig::new(config.url.expose_secret())
                .with_max_connections(config.max_connections),
        )
        .await?;
        check_connection(&pool).await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// 把查询条件拼接到 SQL 语句尾部
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    let mut sep = " WHERE ";
    if let Some(id) = filter.id {
        qb.push(sep).push("id = ").push_bind(id);
        sep = " AND ";
    }
    if let Some(ids) = &filter.ids {
        qb.push(sep).push("id = ANY(").push_bind(ids.clone()).push(")");
        sep = " AND ";
    }
    if let Some(available) = filter.available {
        qb.push(sep).push("available = ").push_bind(available);
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn create(&self, fields: NewProduct) -> RpcResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price, available, created_at, updated_at
            "#,
        )
        .bind(fields.name)
        .bind(fields.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RpcError::database(format!("Failed to create product: {}", e)))?;

        Ok(row.into())
    }

    async fn count(&self, filter: &ProductFilter) -> RpcResult<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filter(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RpcError::database(format!("Failed to count products: {}", e)))?;

        Ok(count as u64)
    }

    async fn find_many(
        &self,
        filter: &ProductFilter,
        page: Option<&Pagination>,
    ) -> RpcResult<Vec<Product>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id");

        if let Some(page) = page {
            qb.push(" LIMIT ").push_bind(i64::from(page.limit));
            qb.push(" OFFSET ").push_bind(page.offset() as i64);
        }

        let rows: Vec<ProductRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RpcError::database(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_first(&self, filter: &ProductFilter) -> RpcResult<Option<Product>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id LIMIT 1");

        let row: Option<ProductRow> = qb
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RpcError::database(format!("Failed to fetch product: {}", e)))?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> RpcResult<Product> {
        let mut qb = QueryBuilder::new("UPDATE products SET ");
        {
            let mut sep = qb.separated(", ");
            if let Some(name) = changes.name {
                sep.push("name = ");
                sep.push_bind_unseparated(name);
            }
            if let Some(price) = changes.price {
                sep.push("price = ");
                sep.push_bind_unseparated(price);
            }
            if let Some(available) = changes.available {
                sep.push("available = ");
                sep.push_bind_unseparated(available);
            }
            // 空 patch 也会推进 updated_at
            sep.push("updated_at = now()");
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {}", PRODUCT_COLUMNS));

        let row: ProductRow = qb
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RpcError::database(format!("Failed to update product {}: {}", id, e)))?;

        Ok(row.into())
    }
}
