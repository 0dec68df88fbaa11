//! Registry of extraction categories.

use std::sync::{OnceLock, RwLock};

use crate::alias::AliasPatch;
use crate::category::Category;
use crate::CatalogError;

/// Global registry of categories.
static CATEGORIES: RwLock<Vec<Category>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a category.
///
/// A category with the same name as an existing one replaces it, so
/// user configuration can redefine a built-in.
pub fn register_category(category: Category) {
    init_builtin();
    let mut categories = CATEGORIES.write().unwrap();
    match categories.iter_mut().find(|c| c.name == category.name) {
        Some(existing) => *existing = category,
        None => categories.push(category),
    }
}

/// The built-in categories, in registration order.
pub fn builtin_categories() -> Vec<Category> {
    vec![
        Category::functions("activations").describe("Activation functions"),
        Category::classes("constraints").describe("Weight constraints"),
        Category::classes("initializers").describe("Weight initializers"),
        Category::classes("regularizers")
            .describe("Weight regularizers")
            .patch(AliasPatch::new("L1L2", ["l1l2"])),
    ]
}

/// Initialize built-in categories (called automatically on first use).
fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut categories = CATEGORIES.write().unwrap();
        for builtin in builtin_categories() {
            if !categories.iter().any(|c| c.name == builtin.name) {
                categories.push(builtin);
            }
        }
    });
}

/// Get a category by name.
pub fn category(name: &str) -> Option<Category> {
    init_builtin();
    CATEGORIES
        .read()
        .unwrap()
        .iter()
        .find(|c| c.name == name)
        .cloned()
}

/// Get a category by name, failing for unregistered names.
pub fn require_category(name: &str) -> Result<Category, CatalogError> {
    category(name).ok_or_else(|| CatalogError::UnknownCategory(name.to_string()))
}

/// List all registered categories.
pub fn categories() -> Vec<Category> {
    init_builtin();
    CATEGORIES.read().unwrap().clone()
}

/// List all registered category names.
pub fn category_names() -> Vec<String> {
    init_builtin();
    CATEGORIES
        .read()
        .unwrap()
        .iter()
        .map(|c| c.name.clone())
        .collect()
}
