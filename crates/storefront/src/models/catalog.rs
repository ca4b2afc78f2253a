//! Product catalog state and read-side queries.
//!
//! The catalog is replaced wholesale at startup and then only read. Search,
//! category filtering and sorting produce a new view on every call and never
//! reorder the stored collection, so repeated or reordered filter changes
//! always give the same result.

use core::fmt;
use std::cmp::Ordering;
use std::str::FromStr;

use shopfront_core::ProductId;

use super::product::Product;

/// Mutations accepted by [`Catalog::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// Replace the whole collection.
    SetAll(Vec<Product>),
}

/// Sort orders offered by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Stored (seed) order.
    #[default]
    Featured,
    PriceAscending,
    PriceDescending,
    /// Highest rating first.
    Rating,
    /// Most reviews first.
    Popularity,
    /// Alphabetical by name.
    Name,
}

impl SortOrder {
    pub const ALL: [Self; 6] = [
        Self::Featured,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::Rating,
        Self::Popularity,
        Self::Name,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAscending => "price-asc",
            Self::PriceDescending => "price-desc",
            Self::Rating => "rating",
            Self::Popularity => "popularity",
            Self::Name => "name",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => Ordering::Equal,
            Self::PriceAscending => a.price().cmp(&b.price()),
            Self::PriceDescending => b.price().cmp(&a.price()),
            Self::Rating => b.rating().total_cmp(&a.rating()),
            Self::Popularity => b.reviews().cmp(&a.reviews()),
            Self::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| format!("unknown sort order: {s}"))
    }
}

/// Listing filters. The default query returns every product in stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against name, category and badge.
    pub search: Option<String>,
    /// Case-insensitive exact category match.
    pub category: Option<String>,
    /// Hide products whose tracked stock is zero.
    pub in_stock_only: bool,
    pub sort: SortOrder,
}

impl CatalogQuery {
    fn matches(&self, product: &Product) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .is_none_or(|term| {
                let term = term.to_lowercase();
                [Some(product.name()), product.category(), product.badge()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&term))
            });

        let category_ok = self.category.as_deref().is_none_or(|wanted| {
            product
                .category()
                .is_some_and(|c| c.eq_ignore_ascii_case(wanted))
        });

        let stock_ok = !self.in_stock_only || product.is_in_stock();

        search_ok && category_ok && stock_ok
    }
}

/// The product collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Pure reducer.
    #[must_use]
    pub fn reduce(mut self, action: CatalogAction) -> Self {
        self.apply(action);
        self
    }

    pub fn apply(&mut self, action: CatalogAction) {
        match action {
            CatalogAction::SetAll(products) => self.set_all(products),
        }
    }

    /// Replace the collection.
    pub fn set_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    #[must_use]
    pub fn select_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// All products in stored order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for category in self.products.iter().filter_map(Product::category) {
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    /// Filter and sort into a new view. The stored order is the tiebreak.
    #[must_use]
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        let mut view: Vec<&Product> = self.products.iter().filter(|p| query.matches(p)).collect();
        view.sort_by(|a, b| query.sort.compare(a, b));
        view
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(
        id: &str,
        name: &str,
        price: i64,
        rating: f32,
        reviews: u32,
        category: &str,
    ) -> Product {
        Product::new(id, name, Decimal::from(price), "img.png")
            .unwrap()
            .with_rating(rating, reviews)
            .unwrap()
            .with_category(category)
    }

    fn catalog() -> Catalog {
        Catalog::new().reduce(CatalogAction::SetAll(vec![
            product("p1", "Wireless Headphones", 120, 4.5, 88, "Audio"),
            product("p2", "Smart Watch", 250, 4.8, 40, "Wearables"),
            product("p3", "Bluetooth Speaker", 60, 4.1, 230, "Audio"),
            product("p4", "Fitness Band", 45, 3.9, 12, "Wearables").with_stock(0),
        ]))
    }

    fn ids(view: &[&Product]) -> Vec<String> {
        view.iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn test_select_by_id() {
        let catalog = Catalog::new().reduce(CatalogAction::SetAll(vec![
            product("p1", "One", 10, 4.0, 1, "A"),
            product("p2", "Two", 20, 4.0, 1, "A"),
        ]));
        assert_eq!(
            catalog
                .select_by_id(&ProductId::new("p2"))
                .map(Product::name),
            Some("Two")
        );
        assert!(catalog.select_by_id(&ProductId::new("p3")).is_none());
    }

    #[test]
    fn test_set_all_replaces() {
        let mut catalog = catalog();
        catalog.set_all(vec![product("x", "X", 1, 1.0, 0, "Misc")]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_default_query_is_stored_order() {
        let c = catalog();
        assert_eq!(
            ids(&c.query(&CatalogQuery::default())),
            ["p1", "p2", "p3", "p4"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_category() {
        let c = catalog();
        let query = CatalogQuery {
            search: Some("AUDIO".into()),
            ..Default::default()
        };
        assert_eq!(ids(&c.query(&query)), ["p1", "p3"]);

        let query = CatalogQuery {
            search: Some("watch".into()),
            ..Default::default()
        };
        assert_eq!(ids(&c.query(&query)), ["p2"]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let c = catalog();
        let query = CatalogQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(c.query(&query).len(), 4);
    }

    #[test]
    fn test_sorts() {
        let c = catalog();
        let by = |sort| {
            let query = CatalogQuery {
                sort,
                ..Default::default()
            };
            ids(&c.query(&query))
        };
        assert_eq!(by(SortOrder::PriceAscending), ["p4", "p3", "p1", "p2"]);
        assert_eq!(by(SortOrder::PriceDescending), ["p2", "p1", "p3", "p4"]);
        assert_eq!(by(SortOrder::Rating), ["p2", "p1", "p3", "p4"]);
        assert_eq!(by(SortOrder::Popularity), ["p3", "p1", "p2", "p4"]);
        assert_eq!(by(SortOrder::Name), ["p3", "p4", "p2", "p1"]);
    }

    #[test]
    fn test_queries_do_not_mutate_and_filters_commute() {
        let c = catalog();
        let before = c.clone();
        let sorted = CatalogQuery {
            sort: SortOrder::PriceAscending,
            category: Some("wearables".into()),
            in_stock_only: true,
            ..Default::default()
        };
        let first = ids(&c.query(&sorted));
        let _ = c.query(&CatalogQuery {
            sort: SortOrder::Rating,
            ..Default::default()
        });
        assert_eq!(ids(&c.query(&sorted)), first);
        assert_eq!(first, ["p2"]);
        assert_eq!(c, before);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(catalog().categories(), ["Audio", "Wearables"]);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!(
            "price-desc".parse::<SortOrder>().unwrap(),
            SortOrder::PriceDescending
        );
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
