pub mod user_repo;
pub use user_repo::UserRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod establishment_repo;
pub use establishment_repo::EstablishmentRepository;
pub mod register_repo;
pub use register_repo::RegisterRepository;
pub mod seller_repo;
pub use seller_repo::SellerRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod brand_repo;
pub use brand_repo::BrandRepository;
pub mod tax_rate_repo;
pub use tax_rate_repo::TaxRateRepository;
pub mod variation_repo;
pub use variation_repo::VariationRepository;
pub mod closure_repo;
pub use closure_repo::ClosureRepository;
pub mod movement_repo;
pub use movement_repo::MovementRepository;

#[cfg(test)]
mod tests;
