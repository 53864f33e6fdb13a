//! Cart commands.

use greenbasket_core::CartEntryId;
use greenbasket_store::{AllergenAck, Catalog, StorageBackend, Store, StoreError};
use rust_decimal::Decimal;

/// Add a product to the cart and the tracker.
///
/// Without `--proceed`, an allergen conflict prints guidance and adds
/// nothing; the user re-runs with `--proceed` to confirm. This is the
/// two-phase contract: the store reports, the caller decides.
#[allow(clippy::print_stdout)]
pub fn add<S: StorageBackend>(
    catalog: &Catalog,
    store: &mut Store<S>,
    id: &str,
    quantity: u32,
    proceed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = catalog.get(id)?;
    let ack = if proceed {
        AllergenAck::Proceed
    } else {
        AllergenAck::Prompt
    };

    match store.add_to_cart(product, quantity, ack) {
        Ok(entry) => {
            println!(
                "Added {} x{} to cart and tracker (entry {}).",
                entry.name, entry.quantity, entry.id
            );
            Ok(())
        }
        Err(StoreError::AllergenConflict { allergens }) => {
            let names: Vec<&str> = allergens.iter().map(String::as_str).collect();
            println!(
                "Warning: {} contains flagged allergens ({}). Nothing was added; \
                 re-run with --proceed to add anyway.",
                product.name,
                names.join(", ")
            );
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

/// Remove a cart line by entry id.
#[allow(clippy::print_stdout)]
pub fn remove<S: StorageBackend>(
    store: &mut Store<S>,
    entry_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let id: CartEntryId = entry_id.parse()?;
    if store.remove_from_cart(id)? {
        println!("Removed cart entry {id}.");
    } else {
        println!("No cart entry {id}; nothing to do.");
    }
    Ok(())
}

/// Change a cart line's quantity.
#[allow(clippy::print_stdout)]
pub fn set_quantity<S: StorageBackend>(
    store: &mut Store<S>,
    entry_id: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let id: CartEntryId = entry_id.parse()?;
    store.update_quantity(id, quantity)?;
    println!("Cart entry {id} set to {quantity} serving(s).");
    Ok(())
}

/// List cart lines.
#[allow(clippy::print_stdout)]
pub fn list<S: StorageBackend>(store: &Store<S>) {
    if store.cart().is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for entry in store.cart() {
        println!(
            "{}  {:<40} x{:<3} @ {:>8} = {:>8}",
            entry.id,
            entry.name,
            entry.quantity,
            entry.price,
            entry.line_price()
        );
    }
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub fn clear<S: StorageBackend>(store: &mut Store<S>) -> Result<(), Box<dyn std::error::Error>> {
    store.clear_cart()?;
    println!("Cart cleared. Tracker entries are untouched.");
    Ok(())
}

/// Print subtotal, tax, and total at the configured rate.
#[allow(clippy::print_stdout)]
pub fn summary<S: StorageBackend>(store: &Store<S>, tax_rate: Decimal) {
    let summary = store.cart_summary(tax_rate);
    println!("Items:    {}", summary.item_count);
    println!("Subtotal: {}", summary.subtotal);
    println!("Tax:      {}", summary.tax);
    println!("Total:    {}", summary.total);
}
