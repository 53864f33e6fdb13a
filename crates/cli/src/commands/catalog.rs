//! Catalog browsing commands.

use greenbasket_core::has_conflict;
use greenbasket_store::{Catalog, StorageBackend, Store};

/// List every product with price and calories.
#[allow(clippy::print_stdout)]
pub fn list(catalog: &Catalog) {
    if catalog.is_empty() {
        println!("The catalog is empty.");
        return;
    }
    for product in catalog.products() {
        println!(
            "{:<14} {:<40} {:>8}  {:>5} cal",
            product.id, product.name, product.price, product.calories
        );
    }
}

/// Show one product in detail, flagging allergen conflicts for this user.
#[allow(clippy::print_stdout)]
pub fn show<S: StorageBackend>(
    catalog: &Catalog,
    store: &Store<S>,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = catalog.get(id)?;

    println!("{} ({})", product.name, product.id);
    println!("  price:    {}", product.price);
    println!("  calories: {}", product.calories);
    println!(
        "  macros:   protein {}g, carbs {}g, fat {}g, fiber {}g, sugar {}g",
        product.nutrients.protein,
        product.nutrients.carbs,
        product.nutrients.fat,
        product.nutrients.fiber,
        product.nutrients.sugar
    );
    if product.allergens.is_empty() {
        println!("  allergens: none");
    } else {
        let names: Vec<&str> = product.allergens.iter().map(String::as_str).collect();
        println!("  allergens: {}", names.join(", "));
        if has_conflict(&product.allergens, store.allergens()) {
            println!("  WARNING: conflicts with your flagged allergens");
        }
    }
    if !product.ingredients.is_empty() {
        println!("  ingredients: {}", product.ingredients.join(", "));
    }
    Ok(())
}

/// Search products by name fragment.
#[allow(clippy::print_stdout)]
pub fn search(catalog: &Catalog, query: &str) {
    let mut any = false;
    for product in catalog.search(query) {
        any = true;
        println!("{:<14} {}", product.id, product.name);
    }
    if !any {
        println!("No products match '{query}'.");
    }
}
