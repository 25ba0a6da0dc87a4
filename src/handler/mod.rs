pub mod product_handler;
pub mod user_handler;
