pub mod memory;
pub mod postgres;
mod rows;

pub use memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
