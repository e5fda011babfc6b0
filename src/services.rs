pub mod auth;
pub mod catalog_service;
pub mod closure_service;
pub mod movement_service;
pub mod seed_service;
pub mod seller_service;
pub mod tax_rate_service;

#[cfg(test)]
mod tests;
