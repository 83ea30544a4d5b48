use serde::Serialize;

/// A fixed classification tag attached to transactions.
///
/// Categories are read-only reference data. The set is defined by `CATEGORIES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    key: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
}

impl Category {
    const fn new(
        key: &'static str,
        name: &'static str,
        icon: &'static str,
        color: &'static str,
    ) -> Self {
        Self {
            key,
            name,
            icon,
            color,
        }
    }

    /// The key stored on transactions, e.g. `food`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The display name, e.g. `Alimentação`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The name of the Feather icon used for this category.
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// Hex color, e.g. `#FF872C`.
    pub fn color(&self) -> &'static str {
        self.color
    }
}

/// The category table, in display order.
pub const CATEGORIES: &[Category] = &[
    Category::new("purchases", "Compras", "shopping-bag", "#5636D3"),
    Category::new("food", "Alimentação", "coffee", "#FF872C"),
    Category::new("salary", "Salário", "dollar-sign", "#12A454"),
    Category::new("car", "Carro", "crosshair", "#E83F5B"),
    Category::new("leisure", "Lazer", "heart", "#26195C"),
    Category::new("studies", "Estudos", "book", "#9C001A"),
];

/// Finds the category with the given key.
pub fn find_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}
