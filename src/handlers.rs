pub mod auth;
pub mod brands;
pub mod clients;
pub mod database;
pub mod establishments;
pub mod movements;
pub mod registers;
pub mod sales;
pub mod sellers;
pub mod suppliers;
pub mod tax_rates;
pub mod variations;
