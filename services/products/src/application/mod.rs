pub mod handler;

pub use handler::ProductService;
