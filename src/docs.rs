// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::session,

        // --- Database ---
        handlers::database::seed,
        handlers::database::health,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Establishments ---
        handlers::establishments::list_establishments,
        handlers::establishments::create_establishment,
        handlers::establishments::get_establishment,
        handlers::establishments::update_establishment,
        handlers::establishments::deactivate_establishment,

        // --- Registers ---
        handlers::registers::list_registers,
        handlers::registers::create_register,
        handlers::registers::get_register,
        handlers::registers::update_register,
        handlers::registers::deactivate_register,

        // --- Sellers ---
        handlers::sellers::list_sellers,
        handlers::sellers::create_seller,
        handlers::sellers::get_seller,
        handlers::sellers::update_seller,
        handlers::sellers::deactivate_seller,

        // --- Suppliers ---
        handlers::suppliers::list_suppliers,
        handlers::suppliers::create_supplier,
        handlers::suppliers::get_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::archive_supplier,

        // --- Brands ---
        handlers::brands::list_brands,
        handlers::brands::create_brand,
        handlers::brands::get_brand,
        handlers::brands::update_brand,
        handlers::brands::archive_brand,

        // --- Tax rates ---
        handlers::tax_rates::list_tax_rates,
        handlers::tax_rates::create_tax_rate,
        handlers::tax_rates::get_tax_rate,
        handlers::tax_rates::update_tax_rate,
        handlers::tax_rates::archive_tax_rate,

        // --- Variations ---
        handlers::variations::list_groups,
        handlers::variations::create_group,
        handlers::variations::update_group,
        handlers::variations::archive_group,
        handlers::variations::list_variations,
        handlers::variations::create_variation,
        handlers::variations::get_variation,
        handlers::variations::update_variation,
        handlers::variations::archive_variation,

        // --- Sales ---
        handlers::sales::check_closure,
        handlers::sales::list_closures,
        handlers::sales::close_day,

        // --- Movements ---
        handlers::movements::list_movements,
        handlers::movements::create_movement,
        handlers::movements::get_movement,
        handlers::movements::archive_movement,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::SessionInfo,

            // --- Seed ---
            models::seed::SeedPayload,
            models::seed::SeedReport,

            // --- Cadastros ---
            models::client::Client,
            models::client::ClientPayload,
            models::establishment::Establishment,
            models::establishment::EstablishmentPayload,
            models::register::Register,
            models::register::RegisterPayload,
            models::seller::Seller,
            models::seller::SellerPayload,
            models::supplier::Supplier,
            models::supplier::SupplierPayload,
            models::brand::Brand,
            models::brand::BrandPayload,
            models::tax_rate::TaxRate,
            models::tax_rate::TaxRatePayload,
            models::variation::VariationGroup,
            models::variation::VariationGroupPayload,
            models::variation::Variation,
            models::variation::VariationPayload,

            // --- Vendas e estoque ---
            models::closure::Closure,
            models::closure::ClosurePayload,
            models::closure::ClosureStatus,
            models::movement::MovementType,
            models::movement::Movement,
            models::movement::MovementPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Login e sessão"),
        (name = "Database", description = "Seed e saúde do serviço"),
        (name = "Clients", description = "Clientes e fidelidade"),
        (name = "Establishments", description = "Lojas físicas"),
        (name = "Registers", description = "Caixas (apenas desativação)"),
        (name = "Sellers", description = "Vendedores e seus estabelecimentos"),
        (name = "Suppliers", description = "Fornecedores"),
        (name = "Brands", description = "Marcas"),
        (name = "Tax rates", description = "Taxas de IVA (uma padrão por tenant)"),
        (name = "Variations", description = "Grupos e variações de produto"),
        (name = "Sales", description = "Fechamento de caixa"),
        (name = "Movements", description = "Movimentações de estoque")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("api_jwt", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/login",
            "/api/tax-rates/{id}",
            "/api/sales/check-closure",
            "/api/variations/groups/{id}/delete",
            "/api/movements/create",
        ] {
            assert!(doc.paths.paths.contains_key(path), "rota ausente: {path}");
        }
        assert!(doc.components.unwrap().security_schemes.contains_key("api_jwt"));
    }
}
