//! Greenbasket CLI - storefront and tracker from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! basket catalog list
//!
//! # Add two servings of a product to the cart (and the tracker)
//! basket cart add lays-001 -q 2
//!
//! # Add despite an allergen conflict
//! basket cart add betagen-001 --proceed
//!
//! # Today's totals against goals
//! basket tracker show
//!
//! # Export the last week of tracker entries as CSV
//! basket export --period week
//! ```
//!
//! # Environment Variables
//!
//! - `BASKET_DATA_DIR` - directory for persisted state (default: `.greenbasket`)
//! - `BASKET_CATALOG` - catalog JSON path (default: `catalog.json`)
//! - `BASKET_TAX_RATE` - checkout tax rate (default: `0.07`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use greenbasket_store::{Catalog, Config, FileStorage, Store};

mod commands;
mod period;

use period::PeriodArg;

#[derive(Parser)]
#[command(name = "basket")]
#[command(author, version, about = "Greenbasket storefront and nutrition tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect the consumption tracker
    Tracker {
        #[command(subcommand)]
        action: TrackerAction,
    },
    /// Export tracker entries as CSV
    Export {
        /// Window to export
        #[arg(long, value_enum, default_value_t = PeriodArg::Month)]
        period: PeriodArg,
    },
    /// Manage flagged allergens
    Allergens {
        #[command(subcommand)]
        action: AllergenAction,
    },
    /// Manage tracking goals
    Goals {
        #[command(subcommand)]
        action: GoalAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
    /// Show one product in detail
    Show {
        /// Product id
        id: String,
    },
    /// Search products by name
    Search {
        /// Case-insensitive name fragment
        query: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart and the tracker
    Add {
        /// Product id
        id: String,

        /// Serving count (1-99)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Add even if the product conflicts with flagged allergens
        #[arg(long)]
        proceed: bool,
    },
    /// Remove a cart line
    Remove {
        /// Cart entry id (shown by `cart list`)
        entry_id: String,
    },
    /// Change a cart line's quantity
    SetQty {
        /// Cart entry id
        entry_id: String,

        /// New serving count (1-99)
        quantity: u32,
    },
    /// List cart lines
    List,
    /// Empty the cart (the tracker is untouched)
    Clear,
    /// Subtotal, tax, and total
    Summary,
}

#[derive(Subcommand)]
enum TrackerAction {
    /// Totals and goal progress for a window
    Show {
        /// Window to aggregate
        #[arg(long, value_enum, default_value_t = PeriodArg::Today)]
        period: PeriodArg,
    },
    /// Entries in a window, newest first
    Entries {
        /// Window to list
        #[arg(long, value_enum, default_value_t = PeriodArg::Today)]
        period: PeriodArg,
    },
    /// Remove entries logged at an exact timestamp (RFC 3339)
    Remove {
        /// Timestamp shown by `tracker entries`
        timestamp: String,
    },
    /// Clear tracked entries
    Reset {
        /// Only clear entries from the current local day
        #[arg(long)]
        today: bool,
    },
}

#[derive(Subcommand)]
enum AllergenAction {
    /// Replace the flagged allergen set
    Set {
        /// Allergen names (lowercase), e.g. `milk soy`
        names: Vec<String>,
    },
    /// Show the flagged allergen set
    Show,
}

#[derive(Subcommand)]
enum GoalAction {
    /// Replace the daily goals
    Set {
        /// Daily calorie goal
        #[arg(long, default_value_t = 2000)]
        calories: u32,

        /// Daily protein goal in grams
        #[arg(long, default_value = "50")]
        protein: rust_decimal::Decimal,

        /// Daily carbohydrate goal in grams
        #[arg(long, default_value = "250")]
        carbs: rust_decimal::Decimal,

        /// Daily fat goal in grams
        #[arg(long, default_value = "70")]
        fat: rust_decimal::Decimal,
    },
    /// Show the current goals
    Show,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // A missing or malformed catalog degrades to an empty one; the session
    // stays usable for tracker and settings commands.
    let catalog = match Catalog::load(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(
                path = %config.catalog_path.display(),
                error = %e,
                "catalog unavailable, continuing with an empty catalog"
            );
            Catalog::empty()
        }
    };

    let backend = FileStorage::open(&config.data_dir)?;
    let (mut store, report) = Store::restore(backend);
    for key in &report.resets {
        tracing::warn!(%key, "stored data was corrupted and has been reset");
    }

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&catalog),
            CatalogAction::Show { id } => commands::catalog::show(&catalog, &store, &id)?,
            CatalogAction::Search { query } => commands::catalog::search(&catalog, &query),
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                quantity,
                proceed,
            } => commands::cart::add(&catalog, &mut store, &id, quantity, proceed)?,
            CartAction::Remove { entry_id } => commands::cart::remove(&mut store, &entry_id)?,
            CartAction::SetQty { entry_id, quantity } => {
                commands::cart::set_quantity(&mut store, &entry_id, quantity)?;
            }
            CartAction::List => commands::cart::list(&store),
            CartAction::Clear => commands::cart::clear(&mut store)?,
            CartAction::Summary => commands::cart::summary(&store, config.tax_rate),
        },
        Commands::Tracker { action } => match action {
            TrackerAction::Show { period } => commands::tracker::show(&store, period.into()),
            TrackerAction::Entries { period } => commands::tracker::entries(&store, period.into()),
            TrackerAction::Remove { timestamp } => {
                commands::tracker::remove(&mut store, &timestamp)?;
            }
            TrackerAction::Reset { today } => commands::tracker::reset(&mut store, today)?,
        },
        Commands::Export { period } => commands::tracker::export_csv(&store, period.into()),
        Commands::Allergens { action } => match action {
            AllergenAction::Set { names } => commands::settings::set_allergens(&mut store, names)?,
            AllergenAction::Show => commands::settings::show_allergens(&store),
        },
        Commands::Goals { action } => match action {
            GoalAction::Set {
                calories,
                protein,
                carbs,
                fat,
            } => commands::settings::set_goals(&mut store, calories, protein, carbs, fat)?,
            GoalAction::Show => commands::settings::show_goals(&store),
        },
    }
    Ok(())
}
