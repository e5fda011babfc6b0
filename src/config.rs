// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        BrandRepository, ClientRepository, ClosureRepository, EstablishmentRepository, MovementRepository,
        RegisterRepository, SellerRepository, SupplierRepository, TaxRateRepository, TenantRepository,
        UserRepository, VariationRepository,
    },
    services::{
        auth::AuthService, catalog_service::CatalogService, closure_service::ClosureService,
        movement_service::MovementService, seed_service::SeedService, seller_service::SellerService,
        tax_rate_service::TaxRateService,
    },
};

const MIN_SECRET_LEN: usize = 16;

// Configuração lida do ambiente (.env incluso)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub token_ttl_hours: i64,
    pub seed_enabled: bool,
    pub cors_origin: Option<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Lê as chaves por uma função, para poder testar sem mexer no ambiente do processo.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            bail!("JWT_SECRET deve ter pelo menos {MIN_SECRET_LEN} bytes");
        }

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().with_context(|| format!("DB_MAX_CONNECTIONS inválido: {v}"))?,
            None => 5,
        };

        let token_ttl_hours = match lookup("TOKEN_TTL_HOURS") {
            Some(v) => v.parse().with_context(|| format!("TOKEN_TTL_HOURS inválido: {v}"))?,
            None => 12,
        };
        if token_ttl_hours <= 0 {
            bail!("TOKEN_TTL_HOURS deve ser positivo");
        }

        let seed_enabled = match lookup("SEED_ENABLED") {
            Some(v) => parse_bool(&v).with_context(|| format!("SEED_ENABLED inválido: {v}"))?,
            None => false,
        };

        let cors_origin = lookup("CORS_ORIGIN").filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections,
            token_ttl_hours,
            seed_enabled,
            cors_origin,
        })
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("valor booleano desconhecido: {other}"),
    }
}

// Repositórios sem estado, usados direto pelos handlers de CRUD simples
#[derive(Clone, Default)]
pub struct Repositories {
    pub clients: ClientRepository,
    pub establishments: EstablishmentRepository,
    pub registers: RegisterRepository,
    pub sellers: SellerRepository,
    pub suppliers: SupplierRepository,
    pub brands: BrandRepository,
    pub tax_rates: TaxRateRepository,
    pub variations: VariationRepository,
    pub closures: ClosureRepository,
    pub movements: MovementRepository,
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Arc<Settings>,
    pub repos: Repositories,
    pub auth_service: AuthService,
    pub tax_rate_service: TaxRateService,
    pub seller_service: SellerService,
    pub catalog_service: CatalogService,
    pub closure_service: ClosureService,
    pub movement_service: MovementService,
    pub seed_service: SeedService,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, settings))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_pool(db_pool: PgPool, settings: Settings) -> Self {
        let repos = Repositories::default();
        let auth_service = AuthService::new(UserRepository::new(), &settings.jwt_secret, settings.token_ttl_hours);

        let seed_service = SeedService::new(
            auth_service.clone(),
            TenantRepository::new(),
            UserRepository::new(),
            repos.establishments.clone(),
            repos.registers.clone(),
            repos.tax_rates.clone(),
            db_pool.clone(),
        );

        Self {
            tax_rate_service: TaxRateService::new(repos.tax_rates.clone()),
            seller_service: SellerService::new(repos.sellers.clone()),
            catalog_service: CatalogService::new(
                repos.establishments.clone(),
                repos.registers.clone(),
                repos.suppliers.clone(),
                repos.brands.clone(),
                repos.variations.clone(),
            ),
            closure_service: ClosureService::new(repos.closures.clone(), repos.registers.clone()),
            movement_service: MovementService::new(repos.movements.clone(), repos.establishments.clone()),
            seed_service,
            auth_service,
            repos,
            settings: Arc::new(settings),
            db_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/pos"),
        ("JWT_SECRET", "um-segredo-bem-comprido"),
    ];

    #[test]
    fn defaults_apply() {
        let settings = Settings::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:3000");
        assert_eq!(settings.db_max_connections, 5);
        assert_eq!(settings.token_ttl_hours, 12);
        assert!(!settings.seed_enabled);
        assert!(settings.cors_origin.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("SEED_ENABLED", "true"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("CORS_ORIGIN", "http://localhost:5173"),
        ]);
        let settings = Settings::from_lookup(lookup(&pairs)).unwrap();
        assert!(settings.seed_enabled);
        assert_eq!(settings.db_max_connections, 20);
        assert_eq!(settings.cors_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn missing_or_weak_secret_fails() {
        assert!(Settings::from_lookup(lookup(&[REQUIRED[0]])).is_err());
        assert!(Settings::from_lookup(lookup(&[REQUIRED[0], ("JWT_SECRET", "curto")])).is_err());
    }

    #[test]
    fn garbage_values_fail() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SEED_ENABLED", "talvez"));
        assert!(Settings::from_lookup(lookup(&pairs)).is_err());
    }
}
