pub mod product_router;
pub mod user_router;
