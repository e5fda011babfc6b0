// Testes de repositório contra um Postgres real.
// Rodar com: DATABASE_URL=... cargo test -- --ignored

use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;

use super::*;
use crate::{
    common::{db_utils::begin_tenant_tx, error::AppError},
    middleware::tenancy::TenantContext,
    models::{
        client::ClientPayload,
        establishment::EstablishmentPayload,
        movement::{MovementPayload, MovementType},
        brand::BrandPayload,
        seller::SellerPayload,
        supplier::SupplierPayload,
        variation::VariationGroupPayload,
    },
};

async fn new_tenant(pool: &PgPool, name: &str) -> TenantContext {
    let tenant = TenantRepository::new().create_tenant(pool, name).await.unwrap();
    TenantContext::trusted(tenant.id)
}

fn client_payload(name: &str) -> ClientPayload {
    ClientPayload {
        name: name.to_string(),
        email: None,
        phone: None,
        address: None,
        city: None,
        postal_code: None,
        notes: None,
        is_loyal: false,
        discount_rate: Decimal::ZERO,
    }
}

#[sqlx::test]
#[ignore]
async fn rows_of_another_tenant_are_invisible(pool: PgPool) {
    let a = new_tenant(&pool, "A").await;
    let b = new_tenant(&pool, "B").await;
    let repo = ClientRepository::new();

    let mut tx = begin_tenant_tx(&pool, &a).await.unwrap();
    let client = repo.create(&mut *tx, &a, &client_payload("Alice")).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = begin_tenant_tx(&pool, &b).await.unwrap();
    assert!(repo.find_by_id(&mut *tx, &b, client.id).await.unwrap().is_none());
    assert!(repo.list(&mut *tx, &b, None).await.unwrap().is_empty());
    assert!(!repo.delete(&mut *tx, &b, client.id).await.unwrap());
    tx.commit().await.unwrap();

    let mut tx = begin_tenant_tx(&pool, &a).await.unwrap();
    assert!(repo.find_by_id(&mut *tx, &a, client.id).await.unwrap().is_some());
}

#[sqlx::test]
#[ignore]
async fn archiving_keeps_the_first_timestamp(pool: PgPool) {
    let tenant = new_tenant(&pool, "Boutique").await;
    let repo = TaxRateRepository::new();
    let mut tx = begin_tenant_tx(&pool, &tenant).await.unwrap();

    let rate = repo
        .insert(&mut *tx, &tenant, "TVA normale", Decimal::new(2000, 2), "TVA20", true)
        .await
        .unwrap();

    let first = repo.archive(&mut *tx, &tenant, rate.id).await.unwrap().unwrap();
    assert!(first.is_archived);
    assert!(!first.is_default);

    let second = repo.archive(&mut *tx, &tenant, rate.id).await.unwrap().unwrap();
    assert_eq!(first.archived_at, second.archived_at);

    assert!(repo.list(&mut *tx, &tenant, false).await.unwrap().is_empty());
    assert_eq!(repo.list(&mut *tx, &tenant, true).await.unwrap().len(), 1);
}

#[sqlx::test]
#[ignore]
async fn duplicate_tax_code_is_reported_by_name(pool: PgPool) {
    let tenant = new_tenant(&pool, "Boutique").await;
    let repo = TaxRateRepository::new();
    let mut tx = begin_tenant_tx(&pool, &tenant).await.unwrap();

    repo.insert(&mut *tx, &tenant, "Réduit", Decimal::new(1000, 2), "TVA10", false)
        .await
        .unwrap();
    let err = repo
        .insert(&mut *tx, &tenant, "Réduit bis", Decimal::new(1000, 2), "TVA10", false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::TaxCodeAlreadyExists(code) if code == "TVA10"));
}

#[sqlx::test]
#[ignore]
async fn movement_numbers_increase_per_tenant(pool: PgPool) {
    let a = new_tenant(&pool, "A").await;
    let b = new_tenant(&pool, "B").await;
    let user = UserRepository::new()
        .create_user(&pool, Some(a.id()), "stock@a.fr", "hash", "Stock", crate::models::auth::UserRole::Cashier)
        .await
        .unwrap();
    let repo = MovementRepository::new();
    let payload = MovementPayload { movement_type: MovementType::Entry, establishment_id: None, comment: None };

    let mut tx = begin_tenant_tx(&pool, &a).await.unwrap();
    let first = repo.create(&mut *tx, &a, &payload, user.id).await.unwrap();
    let second = repo.create(&mut *tx, &a, &payload, user.id).await.unwrap();
    tx.commit().await.unwrap();
    assert_eq!(first.number, 1);
    assert_eq!(second.number, 2);

    let mut tx = begin_tenant_tx(&pool, &b).await.unwrap();
    let other = repo.create(&mut *tx, &b, &payload, user.id).await.unwrap();
    assert_eq!(other.number, 1);
}

#[sqlx::test]
#[ignore]
async fn seller_establishments_must_belong_to_tenant(pool: PgPool) {
    let a = new_tenant(&pool, "A").await;
    let b = new_tenant(&pool, "B").await;

    let establishment = EstablishmentPayload { name: "Lyon".into(), address: None, is_active: true };
    let mut tx = begin_tenant_tx(&pool, &b).await.unwrap();
    let foreign = EstablishmentRepository::new().create(&mut *tx, &b, &establishment).await.unwrap();
    tx.commit().await.unwrap();

    let mut tx = begin_tenant_tx(&pool, &a).await.unwrap();
    let own = EstablishmentRepository::new().create(&mut *tx, &a, &establishment).await.unwrap();

    let repo = SellerRepository::new();
    let payload = SellerPayload {
        name: "Julien".into(),
        code: "JM01".into(),
        establishment_ids: vec![own.id],
        is_active: true,
    };
    let seller_id = repo.insert(&mut *tx, &a, &payload).await.unwrap();
    repo.replace_establishments(&mut tx, &a, seller_id, &[own.id, own.id]).await.unwrap();

    let seller = repo.find_by_id(&mut *tx, &a, seller_id).await.unwrap().unwrap();
    assert_eq!(seller.establishment_ids, vec![own.id]);

    let err = repo
        .replace_establishments(&mut tx, &a, seller_id, &[own.id, foreign.id])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test]
#[ignore]
async fn emails_are_unique_regardless_of_case(pool: PgPool) {
    let tenant = new_tenant(&pool, "Boutique").await;
    let repo = UserRepository::new();
    repo.create_user(&pool, Some(tenant.id()), "Gerant@Boutique.fr", "hash", "Gérant", crate::models::auth::UserRole::Manager)
        .await
        .unwrap();

    let err = repo
        .create_user(&pool, Some(tenant.id()), "gerant@boutique.fr", "hash", "Autre", crate::models::auth::UserRole::Cashier)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmailAlreadyExists));

    let found = repo.find_by_email(&pool, "GERANT@boutique.FR").await.unwrap().unwrap();
    assert_eq!(found.full_name, "Gérant");
}

#[sqlx::test]
#[ignore]
async fn created_client_keeps_trimmed_input(pool: PgPool) {
    let tenant = new_tenant(&pool, "Boutique").await;
    let payload: ClientPayload = serde_json::from_value(json!({
        "name": "  Marie Dupont ",
        "email": " marie@dupont.fr  ",
        "phone": "   ",
        "city": "\tLyon\n",
        "discountRate": 5
    }))
    .unwrap();

    let mut tx = begin_tenant_tx(&pool, &tenant).await.unwrap();
    let created = ClientRepository::new().create(&mut *tx, &tenant, &payload).await.unwrap();
    let stored = ClientRepository::new().find_by_id(&mut *tx, &tenant, created.id).await.unwrap().unwrap();

    assert_eq!(stored.name, "Marie Dupont");
    assert_eq!(stored.email.as_deref(), Some("marie@dupont.fr"));
    assert_eq!(stored.phone, None);
    assert_eq!(stored.city.as_deref(), Some("Lyon"));
    assert_eq!(stored.discount_rate, Decimal::new(5, 0));
}

#[sqlx::test]
#[ignore]
async fn archived_rows_stay_readable(pool: PgPool) {
    let tenant = new_tenant(&pool, "Boutique").await;
    let user = UserRepository::new()
        .create_user(&pool, Some(tenant.id()), "stock@b.fr", "hash", "Stock", crate::models::auth::UserRole::Cashier)
        .await
        .unwrap();
    let mut tx = begin_tenant_tx(&pool, &tenant).await.unwrap();

    let suppliers = SupplierRepository::new();
    let supplier_payload: SupplierPayload = serde_json::from_value(json!({ "name": "Textiles du Nord" })).unwrap();
    let supplier = suppliers.create(&mut *tx, &tenant, &supplier_payload).await.unwrap();
    suppliers.archive(&mut *tx, &tenant, supplier.id).await.unwrap().unwrap();
    let supplier = suppliers.find_by_id(&mut *tx, &tenant, supplier.id).await.unwrap().unwrap();
    assert!(supplier.is_archived && supplier.archived_at.is_some());
    assert!(suppliers.list(&mut *tx, &tenant, false).await.unwrap().is_empty());

    let brands = BrandRepository::new();
    let brand_payload: BrandPayload = serde_json::from_value(json!({ "name": "Maison Lin" })).unwrap();
    let brand = brands.create(&mut *tx, &tenant, &brand_payload).await.unwrap();
    brands.archive(&mut *tx, &tenant, brand.id).await.unwrap().unwrap();
    let brand = brands.find_by_id(&mut *tx, &tenant, brand.id).await.unwrap().unwrap();
    assert!(brand.is_archived && brand.archived_at.is_some());

    let variations = VariationRepository::new();
    let group_payload: VariationGroupPayload =
        serde_json::from_value(json!({ "name": "Tailles", "sortOrder": 1 })).unwrap();
    let group = variations.create_group(&mut *tx, &tenant, &group_payload).await.unwrap();
    let variation = variations.create(&mut *tx, &tenant, group.id, "M", 2).await.unwrap();

    let archived = variations.archive(&mut *tx, &tenant, variation.id).await.unwrap().unwrap();
    assert!(archived.is_archived && archived.archived_at.is_some());
    let variation = variations.find_by_id(&mut *tx, &tenant, variation.id).await.unwrap().unwrap();
    assert!(variation.is_archived);

    let group = variations.archive_group(&mut *tx, &tenant, group.id).await.unwrap().unwrap();
    assert!(group.is_archived && group.archived_at.is_some());
    assert!(!variations.group_exists(&mut *tx, &tenant, group.id).await.unwrap());

    let movements = MovementRepository::new();
    let payload = MovementPayload { movement_type: MovementType::Exit, establishment_id: None, comment: None };
    let movement = movements.create(&mut *tx, &tenant, &payload, user.id).await.unwrap();
    movements.archive(&mut *tx, &tenant, movement.id).await.unwrap().unwrap();
    let movement = movements.find_by_id(&mut *tx, &tenant, movement.id).await.unwrap().unwrap();
    assert!(movement.is_archived && movement.archived_at.is_some());
    assert_eq!(movement.number, 1);
}
