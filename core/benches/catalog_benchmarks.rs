use catalog_core::{
  CategoryService, CreateCategory, CreateProduct, ProductService, Store, TokenIssuer, TokenSettings,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Runtime; // To run async code within Criterion

static NAME_SEQ: AtomicU64 = AtomicU64::new(0);

fn unique_name(prefix: &str) -> String {
  format!("{}-{}", prefix, NAME_SEQ.fetch_add(1, Ordering::Relaxed))
}

fn bench_issuer() -> TokenIssuer {
  TokenIssuer::new(TokenSettings {
    signing_key: "benchmark-signing-key-0123456789".to_string(),
    issuer: "catalog-bench".to_string(),
    audience: "catalog-bench-clients".to_string(),
    lifetime_minutes: 60,
  })
  .unwrap()
}

// --- Benchmark Functions ---

fn bench_tokens(c: &mut Criterion) {
  let mut group = c.benchmark_group("Tokens");
  let issuer = bench_issuer();
  let token = issuer.generate().unwrap().token;

  group.bench_function("generate", |b| {
    b.iter(|| criterion::black_box(issuer.generate().unwrap()));
  });
  group.bench_function("validate", |b| {
    b.iter(|| criterion::black_box(issuer.validate(&token)));
  });
  group.finish();
}

fn bench_service_create(c: &mut Criterion) {
  let mut group = c.benchmark_group("ServiceCreate");
  let rt = Runtime::new().unwrap();

  let (categories, products, category_id) = rt.block_on(async {
    let store = Store::in_memory().await.unwrap();
    let categories = CategoryService::new(store.clone());
    let products = ProductService::new(store);
    let category = categories
      .create(CreateCategory {
        name: "Bench".to_string(),
        description: String::new(),
      })
      .await
      .unwrap();
    (categories, products, category.id)
  });

  group.throughput(Throughput::Elements(1));
  group.bench_function("category", |b| {
    b.to_async(&rt).iter(|| {
      let svc = categories.clone();
      async move {
        svc
          .create(CreateCategory {
            name: unique_name("category"),
            description: String::new(),
          })
          .await
          .unwrap()
      }
    });
  });
  group.bench_function("product", |b| {
    b.to_async(&rt).iter(|| {
      let svc = products.clone();
      async move {
        svc
          .create(CreateProduct {
            name: unique_name("product"),
            description: String::new(),
            price: Decimal::new(999, 2),
            stock: 1,
            category_id,
          })
          .await
          .unwrap()
      }
    });
  });
  group.finish();
}

fn bench_service_read(c: &mut Criterion) {
  let mut group = c.benchmark_group("ServiceRead");
  let rt = Runtime::new().unwrap();

  for products_per_category in [0usize, 10, 100].iter() {
    let (categories, category_id) = rt.block_on(async {
      let store = Store::in_memory().await.unwrap();
      let categories = CategoryService::new(store.clone());
      let products = ProductService::new(store);
      let category = categories
        .create(CreateCategory {
          name: unique_name("read"),
          description: String::new(),
        })
        .await
        .unwrap();
      for _ in 0..*products_per_category {
        products
          .create(CreateProduct {
            name: unique_name("item"),
            description: String::new(),
            price: Decimal::new(100, 2),
            stock: 5,
            category_id: category.id,
          })
          .await
          .unwrap();
      }
      (categories, category.id)
    });

    group.throughput(Throughput::Elements(*products_per_category as u64 + 1));
    group.bench_with_input(
      BenchmarkId::new("category_with_products", products_per_category),
      products_per_category,
      |b, _| {
        b.to_async(&rt).iter(|| {
          let svc = categories.clone();
          async move { svc.get_by_id(category_id).await.unwrap() }
        });
      },
    );
  }
  group.finish();
}

criterion_group!(benches, bench_tokens, bench_service_create, bench_service_read);
criterion_main!(benches);
