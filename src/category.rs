//! Categories

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::items::Item;

new_key_type! {
    /// Category Key
    pub struct CategoryKey;
}

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Category names are unique, ignoring case.
    #[error("category {0:?} already exists")]
    DuplicateCategory(String),

    /// Category names can't be blank.
    #[error("category name cannot be empty")]
    EmptyName,

    /// The key doesn't belong to this catalog.
    #[error("category not found")]
    CategoryNotFound,
}

/// A named grouping of items for browsing, such as "Truffles" or "Bars".
#[derive(Debug, Clone, PartialEq)]
pub struct Category<'a> {
    name: String,
    items: Vec<Item<'a>>,
}

impl<'a> Category<'a> {
    /// Category name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items in the order they were added
    pub fn items(&self) -> &[Item<'a>] {
        &self.items
    }

    /// Finds an item in this category by exact name.
    pub fn item(&self, name: &str) -> Option<&Item<'a>> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Number of items in the category
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the category is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered set of categories, looked up by key or by name ignoring case.
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    categories: SlotMap<CategoryKey, Category<'a>>,
    order: Vec<CategoryKey>,
    by_name: FxHashMap<String, CategoryKey>,
}

impl<'a> Catalog<'a> {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty category.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the name is blank or already used.
    pub fn add_category(&mut self, name: impl Into<String>) -> Result<CategoryKey, CatalogError> {
        let name = name.into();
        let lookup = lookup_key(&name);

        if lookup.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        if self.by_name.contains_key(&lookup) {
            return Err(CatalogError::DuplicateCategory(name));
        }

        let key = self.categories.insert(Category {
            name,
            items: Vec::new(),
        });

        self.order.push(key);
        self.by_name.insert(lookup, key);

        Ok(key)
    }

    /// Returns the key of the named category, creating it if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] if the name is blank.
    pub fn ensure_category(&mut self, name: &str) -> Result<CategoryKey, CatalogError> {
        match self.key(name) {
            Some(key) => Ok(key),
            None => self.add_category(name),
        }
    }

    /// Appends an item to a category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryNotFound`] if the key isn't in this catalog.
    pub fn add_item(&mut self, key: CategoryKey, item: Item<'a>) -> Result<(), CatalogError> {
        let category = self
            .categories
            .get_mut(key)
            .ok_or(CatalogError::CategoryNotFound)?;

        category.items.push(item);

        Ok(())
    }

    /// Looks up a category by key.
    pub fn get(&self, key: CategoryKey) -> Option<&Category<'a>> {
        self.categories.get(key)
    }

    /// Looks up a category key by name, ignoring case and surrounding whitespace.
    pub fn key(&self, name: &str) -> Option<CategoryKey> {
        self.by_name.get(&lookup_key(name)).copied()
    }

    /// Looks up a category by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&Category<'a>> {
        self.key(name).and_then(|key| self.categories.get(key))
    }

    /// Iterate over categories in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Category<'a>> {
        self.order.iter().filter_map(|key| self.categories.get(*key))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn find_ignores_case() -> TestResult {
        let mut catalog = Catalog::new();

        let key = catalog.add_category("Truffles")?;

        catalog.add_item(
            key,
            Item::new(
                "Dark Truffle",
                Money::from_minor(395, USD),
                Money::from_minor(120, USD),
            )?,
        )?;

        let category = catalog.find("  tRUFFLES ").ok_or("category missing")?;

        assert_eq!(category.name(), "Truffles");
        assert_eq!(category.len(), 1);
        assert!(category.item("Dark Truffle").is_some());

        Ok(())
    }

    #[test]
    fn duplicate_names_are_rejected() -> TestResult {
        let mut catalog = Catalog::new();

        catalog.add_category("Bars")?;

        assert_eq!(
            catalog.add_category("BARS"),
            Err(CatalogError::DuplicateCategory("BARS".to_string()))
        );
        assert_eq!(catalog.add_category(" "), Err(CatalogError::EmptyName));
        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn ensure_category_reuses_existing() -> TestResult {
        let mut catalog = Catalog::new();

        let first = catalog.ensure_category("Bars")?;
        let second = catalog.ensure_category("bars")?;

        assert_eq!(first, second);
        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn iter_keeps_insertion_order() -> TestResult {
        let mut catalog = Catalog::new();

        catalog.add_category("Truffles")?;
        catalog.add_category("Bars")?;
        catalog.add_category("Gifts")?;

        let names: Vec<&str> = catalog.iter().map(Category::name).collect();

        assert_eq!(names, vec!["Truffles", "Bars", "Gifts"]);

        Ok(())
    }
}
