pub mod catalog;
pub mod crawler;
pub mod shop;
pub mod web;

pub use catalog::CatalogWalker;
pub use crawler::{FetchError, PageFetcher};
pub use shop::ShopWalker;
pub use web::HttpFetcher;
