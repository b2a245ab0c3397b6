use scaffold_domain::entity::Entity;
use scaffold_macros::entity;

#[entity(id = i64)]
#[derive(Clone, Default)]
struct Product {
    sku: String,
}

fn main() {
    let product = Product {
        id: 7,
        sku: "SKU-1".into(),
        ..Default::default()
    };
    assert_eq!(*product.id(), 7);
    assert!(product.created_at().is_none());
    assert!(!product.is_deleted());
    let _ = format!("{product:?}");
}
