pub mod product;
pub mod repository;

pub use product::{NewProduct, Product, ProductChanges, ProductFilter, ProductPatch};
pub use repository::ProductStore;
