//! Catalog browsing commands.

use clap::Subcommand;

use shopfront_core::ProductId;
use shopfront_storefront::error::Result;
use shopfront_storefront::models::{CatalogQuery, Product, SortOrder};
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::KeyValueStore;

use crate::output;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List products
    List {
        /// Match against name, category or badge
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Hide sold-out products
        #[arg(long)]
        in_stock: bool,

        /// featured, price-asc, price-desc, rating, popularity or name
        #[arg(long, default_value_t = SortOrder::Featured)]
        sort: SortOrder,
    },
    /// Show one product
    Show {
        /// Product ID
        id: ProductId,
    },
    /// List categories
    Categories,
}

pub fn run<S: KeyValueStore + Clone>(state: &AppState<S>, action: CatalogAction) -> Result<()> {
    match action {
        CatalogAction::List {
            search,
            category,
            in_stock,
            sort,
        } => {
            let query = CatalogQuery {
                search,
                category,
                in_stock_only: in_stock,
                sort,
            };
            list(state, &query);
        }
        CatalogAction::Show { id } => show(state, state.product(&id)?),
        CatalogAction::Categories => {
            for category in state.catalog().categories() {
                output::line(category);
            }
        }
    }
    Ok(())
}

fn list<S: KeyValueStore + Clone>(state: &AppState<S>, query: &CatalogQuery) {
    let products = state.catalog().query(query);
    if products.is_empty() {
        output::line("No products match.");
        return;
    }

    let saved = state.wishlist().wishlist();
    let rows: Vec<[String; 6]> = products
        .into_iter()
        .map(|p| {
            [
                p.id().to_string(),
                p.name().to_owned(),
                state.price(p.price()).display(),
                format!("{:.1} ({})", p.rating(), p.reviews()),
                availability(p),
                (if saved.contains(p.id()) { "♥" } else { "" }).to_owned(),
            ]
        })
        .collect();
    output::table(["ID", "NAME", "PRICE", "RATING", "STOCK", ""], &rows);
}

fn show<S: KeyValueStore + Clone>(state: &AppState<S>, product: &Product) {
    output::heading(format!("{} ({})", product.name(), product.id()));

    let mut price = state.price(product.price()).display();
    if let (Some(original), Some(pct)) = (product.original_price(), product.discount_percent()) {
        price = format!("{price}  was {} (-{pct}%)", state.price(original).display());
    }
    output::line(format!("Price:    {price}"));
    if let Some(category) = product.category() {
        output::line(format!("Category: {category}"));
    }
    if let Some(badge) = product.badge() {
        output::line(format!("Badge:    {badge}"));
    }
    output::line(format!(
        "Rating:   {:.1} from {} reviews",
        product.rating(),
        product.reviews()
    ));
    output::line(format!("Stock:    {}", availability(product)));
    output::line(format!("Image:    {}", product.image()));

    if let Some(quantity) = state.cart().cart().quantity_of(product.id()) {
        output::line(format!("In cart:  {quantity}"));
    }
    if state.wishlist().wishlist().contains(product.id()) {
        output::line("Saved to wishlist");
    }
}

fn availability(product: &Product) -> String {
    match product.stock() {
        None => "available".to_owned(),
        Some(0) => "sold out".to_owned(),
        Some(n) => format!("{n} left"),
    }
}
