// Regras de negócio contra um Postgres real (cargo test -- --ignored)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;

use crate::{
    common::{db_utils::begin_tenant_tx, error::AppError, i18n::Resource},
    db::*,
    middleware::tenancy::TenantContext,
    models::{
        auth::UserRole,
        brand::BrandPayload,
        establishment::EstablishmentPayload,
        supplier::SupplierPayload,
        tax_rate::TaxRatePayload,
        variation::{VariationGroupPayload, VariationPayload},
    },
    services::{
        catalog_service::CatalogService, closure_service::ClosureService, tax_rate_service::TaxRateService,
    },
};

async fn new_tenant(pool: &PgPool) -> TenantContext {
    let tenant = TenantRepository::new().create_tenant(pool, "Boutique").await.unwrap();
    TenantContext::trusted(tenant.id)
}

fn rate(code: &str, is_default: bool) -> TaxRatePayload {
    TaxRatePayload { name: code.to_string(), rate: Decimal::new(2000, 2), code: code.to_string(), is_default }
}

#[sqlx::test]
#[ignore]
async fn only_one_default_tax_rate_per_tenant(pool: PgPool) {
    let tenant = new_tenant(&pool).await;
    let service = TaxRateService::new(TaxRateRepository::new());
    let repo = TaxRateRepository::new();
    let mut tx = begin_tenant_tx(&pool, &tenant).await.unwrap();

    let first = service.create(&mut *tx, &tenant, &rate("TVA20", true)).await.unwrap();
    let second = service.create(&mut *tx, &tenant, &rate("TVA10", true)).await.unwrap();

    let defaults: Vec<_> = repo
        .list(&mut *tx, &tenant, true)
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.is_default)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].id, second.id);

    // Volta o padrão para a primeira via update
    service.update(&mut *tx, &tenant, first.id, &rate("TVA20", true)).await.unwrap();
    let reloaded = repo.find_by_id(&mut *tx, &tenant, second.id).await.unwrap().unwrap();
    assert!(!reloaded.is_default);
}

#[sqlx::test]
#[ignore]
async fn archived_rate_cannot_become_default(pool: PgPool) {
    let tenant = new_tenant(&pool).await;
    let service = TaxRateService::new(TaxRateRepository::new());
    let mut tx = begin_tenant_tx(&pool, &tenant).await.unwrap();

    let created = service.create(&mut *tx, &tenant, &rate("TVA55", false)).await.unwrap();
    TaxRateRepository::new().archive(&mut *tx, &tenant, created.id).await.unwrap();

    let err = service.update(&mut *tx, &tenant, created.id, &rate("TVA55", true)).await.unwrap_err();
    assert!(matches!(err, AppError::ArchivedTaxRateCannotBeDefault));
}

#[sqlx::test]
#[ignore]
async fn a_day_closes_once_and_only_for_active_registers(pool: PgPool) {
    let tenant = new_tenant(&pool).await;
    let user = UserRepository::new()
        .create_user(&pool, Some(tenant.id()), "gerant@b.fr", "hash", "Gérant", UserRole::Manager)
        .await
        .unwrap();
    let service = ClosureService::new(ClosureRepository::new(), RegisterRepository::new());
    let day = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    let mut tx = begin_tenant_tx(&pool, &tenant).await.unwrap();
    let establishment = EstablishmentRepository::new()
        .create(&mut *tx, &tenant, &EstablishmentPayload { name: "Lyon".into(), address: None, is_active: true })
        .await
        .unwrap();
    let register = RegisterRepository::new()
        .create(&mut *tx, &tenant, establishment.id, "Caisse 1", true)
        .await
        .unwrap();

    let status = service.check(&mut *tx, &tenant, register.id, day).await.unwrap();
    assert!(!status.closed);

    service.close_day(&mut *tx, &tenant, register.id, day, user.id).await.unwrap();
    let status = service.check(&mut *tx, &tenant, register.id, day).await.unwrap();
    assert!(status.closed);

    let err = service.close_day(&mut *tx, &tenant, register.id, day, user.id).await.unwrap_err();
    assert!(matches!(err, AppError::DayAlreadyClosed));

    RegisterRepository::new().deactivate(&mut *tx, &tenant, register.id).await.unwrap();
    let next_day = day.succ_opt().unwrap();
    let err = service.close_day(&mut *tx, &tenant, register.id, next_day, user.id).await.unwrap_err();
    assert!(matches!(err, AppError::RegisterInactive));
}

fn catalog() -> CatalogService {
    CatalogService::new(
        EstablishmentRepository::new(),
        RegisterRepository::new(),
        SupplierRepository::new(),
        BrandRepository::new(),
        VariationRepository::new(),
    )
}

#[sqlx::test]
#[ignore]
async fn references_to_another_tenant_are_not_found(pool: PgPool) {
    let a = TenantContext::trusted(TenantRepository::new().create_tenant(&pool, "A").await.unwrap().id);
    let b = TenantContext::trusted(TenantRepository::new().create_tenant(&pool, "B").await.unwrap().id);
    let user = UserRepository::new()
        .create_user(&pool, Some(a.id()), "gerant@a.fr", "hash", "Gérant", UserRole::Manager)
        .await
        .unwrap();

    // Tudo criado no tenant B
    let mut tx = begin_tenant_tx(&pool, &b).await.unwrap();
    let supplier_payload: SupplierPayload = serde_json::from_value(json!({ "name": "Fournisseur B" })).unwrap();
    let supplier = SupplierRepository::new().create(&mut *tx, &b, &supplier_payload).await.unwrap();
    let group_payload: VariationGroupPayload = serde_json::from_value(json!({ "name": "Couleurs" })).unwrap();
    let group = VariationRepository::new().create_group(&mut *tx, &b, &group_payload).await.unwrap();
    let establishment = EstablishmentRepository::new()
        .create(&mut *tx, &b, &EstablishmentPayload { name: "Lille".into(), address: None, is_active: true })
        .await
        .unwrap();
    let register = RegisterRepository::new()
        .create(&mut *tx, &b, establishment.id, "Caisse B", true)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    // ...e referenciado a partir do tenant A
    let mut tx = begin_tenant_tx(&pool, &a).await.unwrap();
    let brand: BrandPayload =
        serde_json::from_value(json!({ "name": "Marque A", "supplierId": supplier.id })).unwrap();
    let err = catalog().save_brand(&mut *tx, &a, None, &brand).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Supplier)));

    let variation: VariationPayload =
        serde_json::from_value(json!({ "groupId": group.id, "name": "Rouge" })).unwrap();
    let err = catalog().save_variation(&mut *tx, &a, None, &variation).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::VariationGroup)));

    let closures = ClosureService::new(ClosureRepository::new(), RegisterRepository::new());
    let day = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    let err = closures.close_day(&mut *tx, &a, register.id, day, user.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Register)));
    let err = closures.check(&mut *tx, &a, register.id, day).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::Register)));
}

#[sqlx::test]
#[ignore]
async fn archived_group_accepts_no_new_variations(pool: PgPool) {
    let tenant = new_tenant(&pool).await;
    let repo = VariationRepository::new();
    let mut tx = begin_tenant_tx(&pool, &tenant).await.unwrap();

    let group_payload: VariationGroupPayload = serde_json::from_value(json!({ "name": "Tailles" })).unwrap();
    let group = repo.create_group(&mut *tx, &tenant, &group_payload).await.unwrap();
    let payload: VariationPayload = serde_json::from_value(json!({ "groupId": group.id, "name": "S" })).unwrap();
    let variation = catalog().save_variation(&mut *tx, &tenant, None, &payload).await.unwrap();

    repo.archive_group(&mut *tx, &tenant, group.id).await.unwrap();

    let err = catalog().save_variation(&mut *tx, &tenant, None, &payload).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::VariationGroup)));
    let err = catalog().save_variation(&mut *tx, &tenant, Some(variation.id), &payload).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(Resource::VariationGroup)));
}
