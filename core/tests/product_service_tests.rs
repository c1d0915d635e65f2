// tests/product_service_tests.rs
mod common;
use catalog_core::{CatalogError, CreateProduct, ErrorKind, UpdateProduct};
use common::*;
use rust_decimal::Decimal;

fn update_from(id: i64, name: &str, category_id: i64) -> UpdateProduct {
  UpdateProduct {
    id,
    name: name.to_string(),
    description: "updated".to_string(),
    price: Decimal::new(4250, 2),
    stock: 3,
    active: true,
    category_id,
  }
}

#[tokio::test]
async fn test_create_embeds_category_without_its_products() {
  let fx = fixture().await;
  let office = seed_category(&fx, "Office").await;

  let created = fx.products.create(new_product("Stapler", office.id)).await.unwrap();
  assert!(created.product.id > 0);
  assert_eq!(created.product.price, Decimal::new(1999, 2));
  assert!(created.product.updated_at.is_none());
  let category = created.category.as_ref().expect("category embedded");
  assert_eq!(category.id, office.id);
  assert!(category.products.is_empty());

  let fetched = fx.products.get_by_id(created.product.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fx.products.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_category_is_not_found_and_writes_nothing() {
  let fx = fixture().await;

  let err = fx.products.create(new_product("Nowhere", 12_345)).await.unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(_)), "got {:?}", err);
  assert_eq!(product_count(&fx.store).await, 0);
}

#[tokio::test]
async fn test_duplicate_product_name_is_conflict() {
  let fx = fixture().await;
  let a = seed_category(&fx, "A").await;
  let b = seed_category(&fx, "B").await;
  seed_product(&fx, "Widget", a.id).await;

  // Product names are unique across categories.
  let err = fx.products.create(new_product("Widget", b.id)).await.unwrap_err();
  assert!(matches!(err, CatalogError::Conflict(_)), "got {:?}", err);
  assert_eq!(product_count(&fx.store).await, 1);
}

#[tokio::test]
async fn test_price_and_stock_validation() {
  let fx = fixture().await;
  let shop = seed_category(&fx, "Shop").await;

  let with = |price: Decimal, stock: i32| CreateProduct {
    price,
    stock,
    ..new_product("Probe", shop.id)
  };

  for (price, stock) in [
    (Decimal::new(-1, 2), 1),
    (Decimal::new(1001, 3), 1),
    (Decimal::MAX, 1),
    (Decimal::new(100, 2), -1),
  ] {
    let err = fx.products.create(with(price, stock)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invalid, "price {} stock {}: {:?}", price, stock, err);
  }

  // Trailing zeros beyond two places are still two decimals.
  let ok = fx.products.create(with(Decimal::new(12500, 3), 0)).await.unwrap();
  assert_eq!(ok.product.price, Decimal::new(1250, 2));
  assert_eq!(ok.product.stock, 0);
}

#[tokio::test]
async fn test_update_reparents_and_refreshes_updated_at() {
  let fx = fixture().await;
  let old_home = seed_category(&fx, "Old").await;
  let new_home = seed_category(&fx, "New").await;
  let created = seed_product(&fx, "Mover", old_home.id).await;

  let updated = fx
    .products
    .update(update_from(created.product.id, "Mover", new_home.id))
    .await
    .unwrap();

  assert_eq!(updated.product.category_id, new_home.id);
  assert_eq!(updated.category.as_ref().map(|c| c.id), Some(new_home.id));
  assert_eq!(updated.product.price, Decimal::new(4250, 2));
  assert_eq!(updated.product.created_at, created.product.created_at);
  assert!(updated.product.updated_at.expect("updated_at set") >= created.product.created_at);

  let old_view = fx.categories.get_by_id(old_home.id).await.unwrap().unwrap();
  let new_view = fx.categories.get_by_id(new_home.id).await.unwrap().unwrap();
  assert!(old_view.products.is_empty());
  assert_eq!(new_view.products.len(), 1);
}

#[tokio::test]
async fn test_reparent_to_missing_category_keeps_original() {
  let fx = fixture().await;
  let home = seed_category(&fx, "Home").await;
  let created = seed_product(&fx, "Stayer", home.id).await;

  let err = fx
    .products
    .update(update_from(created.product.id, "Stayer", 8_888))
    .await
    .unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(_)), "got {:?}", err);

  let stored = fx.products.get_by_id(created.product.id).await.unwrap().unwrap();
  assert_eq!(stored.product.category_id, home.id);
  assert_eq!(stored.product.description, created.product.description);
  assert!(stored.product.updated_at.is_none());
}

#[tokio::test]
async fn test_update_name_conflict_and_missing_product() {
  let fx = fixture().await;
  let c = seed_category(&fx, "C").await;
  let first = seed_product(&fx, "First", c.id).await;
  seed_product(&fx, "Second", c.id).await;

  let err = fx
    .products
    .update(update_from(first.product.id, "Second", c.id))
    .await
    .unwrap_err();
  assert!(matches!(err, CatalogError::Conflict(_)), "got {:?}", err);

  let err = fx.products.update(update_from(404, "Lost", c.id)).await.unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_delete_removes_only_the_product() {
  let fx = fixture().await;
  let c = seed_category(&fx, "C").await;
  let gone = seed_product(&fx, "Gone", c.id).await;
  seed_product(&fx, "Stays", c.id).await;

  fx.products.delete(gone.product.id).await.unwrap();
  assert!(fx.products.get_by_id(gone.product.id).await.unwrap().is_none());
  assert_eq!(product_count(&fx.store).await, 1);
  assert_eq!(category_count(&fx.store).await, 1);

  let err = fx.products.delete(gone.product.id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_duplicate_creates_one_wins() {
  let fx = fixture().await;
  let category_id = seed_category(&fx, "Race").await.id;

  let left = fx.products.clone();
  let right = fx.products.clone();
  let (a, b) = tokio::join!(
    tokio::spawn(async move { left.create(new_product("Contested", category_id)).await }),
    tokio::spawn(async move { right.create(new_product("Contested", category_id)).await }),
  );
  let outcomes = [a.unwrap(), b.unwrap()];

  let wins = outcomes.iter().filter(|r| r.is_ok()).count();
  let conflicts = outcomes
    .iter()
    .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::Conflict))
    .count();
  assert_eq!((wins, conflicts), (1, 1), "{:?}", outcomes);
  assert_eq!(product_count(&fx.store).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_creates_on_a_pooled_file_store() {
  let (_dir, fx) = file_fixture(2).await;
  let category_id = seed_category(&fx, "Race").await.id;

  for round in 0..10 {
    // Same name: one insert wins, the other sees it and reports Conflict.
    let contested = format!("Contested {}", round);
    let (left, right) = (fx.products.clone(), fx.products.clone());
    let (name_a, name_b) = (contested.clone(), contested.clone());
    let (a, b) = tokio::join!(
      tokio::spawn(async move { left.create(new_product(&name_a, category_id)).await }),
      tokio::spawn(async move { right.create(new_product(&name_b, category_id)).await }),
    );
    let outcomes = [a.unwrap(), b.unwrap()];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts = outcomes
      .iter()
      .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::Conflict))
      .count();
    assert_eq!((wins, conflicts), (1, 1), "round {}: {:?}", round, outcomes);

    // Different names: both writers queue and both succeed.
    let (left, right) = (fx.products.clone(), fx.products.clone());
    let (a, b) = tokio::join!(
      tokio::spawn(async move { left.create(new_product(&format!("Left {}", round), category_id)).await }),
      tokio::spawn(async move { right.create(new_product(&format!("Right {}", round), category_id)).await }),
    );
    let outcomes = [a.unwrap(), b.unwrap()];
    assert!(outcomes.iter().all(|r| r.is_ok()), "round {}: {:?}", round, outcomes);
  }

  assert_eq!(product_count(&fx.store).await, 30);
}
