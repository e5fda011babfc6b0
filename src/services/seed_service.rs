// src/services/seed_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::{db_utils::set_tenant, error::AppError},
    db::{EstablishmentRepository, RegisterRepository, TaxRateRepository, TenantRepository, UserRepository},
    middleware::tenancy::TenantContext,
    models::{
        auth::UserRole,
        establishment::EstablishmentPayload,
        seed::{SeedPayload, SeedReport},
    },
    services::auth::AuthService,
};

// Taxas de IVA francesas: (nome, taxa em centésimos, código, padrão)
const DEFAULT_TAX_RATES: &[(&str, i64, &str, bool)] = &[
    ("TVA normale", 2000, "TVA20", true),
    ("TVA intermédiaire", 1000, "TVA10", false),
    ("TVA réduite", 550, "TVA55", false),
    ("TVA super réduite", 210, "TVA21", false),
];

#[derive(Clone)]
pub struct SeedService {
    auth_service: AuthService,
    tenant_repo: TenantRepository,
    user_repo: UserRepository,
    establishment_repo: EstablishmentRepository,
    register_repo: RegisterRepository,
    tax_rate_repo: TaxRateRepository,
    pool: PgPool,
}

impl SeedService {
    pub fn new(
        auth_service: AuthService,
        tenant_repo: TenantRepository,
        user_repo: UserRepository,
        establishment_repo: EstablishmentRepository,
        register_repo: RegisterRepository,
        tax_rate_repo: TaxRateRepository,
        pool: PgPool,
    ) -> Self {
        Self { auth_service, tenant_repo, user_repo, establishment_repo, register_repo, tax_rate_repo, pool }
    }

    /// Cria uma loja completa e utilizável numa única transação.
    pub async fn seed(&self, input: &SeedPayload) -> Result<SeedReport, AppError> {
        // 1. Hashing fora da transação
        let password_hash = self.auth_service.hash_password(&input.password).await?;

        let mut tx = self.pool.begin().await?;

        // 2. Tenant + "chave" de RLS para o resto da transação
        let tenant = self.tenant_repo.create_tenant(&mut *tx, &input.tenant_name).await?;
        let ctx = TenantContext::trusted(tenant.id);
        set_tenant(&mut tx, &ctx).await?;

        // 3. Administrador
        let user = self
            .user_repo
            .create_user(&mut *tx, Some(tenant.id), &input.email, &password_hash, &input.full_name, UserRole::Admin)
            .await?;

        // 4. Estabelecimento principal e o seu caixa
        let establishment = self
            .establishment_repo
            .create(
                &mut *tx,
                &ctx,
                &EstablishmentPayload { name: "Boutique principale".into(), address: None, is_active: true },
            )
            .await?;
        let register = self
            .register_repo
            .create(&mut *tx, &ctx, establishment.id, "Caisse 1", true)
            .await?;

        // 5. Taxas
        let mut tax_rate_ids = Vec::with_capacity(DEFAULT_TAX_RATES.len());
        for (name, cents, code, is_default) in DEFAULT_TAX_RATES {
            let rate = self
                .tax_rate_repo
                .insert(&mut *tx, &ctx, name, Decimal::new(*cents, 2), code, *is_default)
                .await?;
            tax_rate_ids.push(rate.id);
        }

        tx.commit().await?;

        tracing::info!(tenant_id = %tenant.id, user_id = %user.id, "🌱 Seed concluído");

        Ok(SeedReport {
            tenant_id: tenant.id,
            user_id: user.id,
            establishment_id: establishment.id,
            register_id: register.id,
            tax_rate_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rates_have_a_single_default() {
        assert_eq!(DEFAULT_TAX_RATES.iter().filter(|(_, _, _, d)| *d).count(), 1);
        assert_eq!(Decimal::new(DEFAULT_TAX_RATES[2].1, 2).to_string(), "5.50");
        for (_, _, code, _) in DEFAULT_TAX_RATES {
            assert!(crate::common::validation::validate_code(code).is_ok());
        }
    }
}
