use crate::commands::Out;
use crate::model::CATEGORIES;
use crate::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Handles `gofin categories`: the category table, in display order.
pub fn categories() -> Result<Out<Vec<CategoryRow>>> {
    let rows: Vec<CategoryRow> = CATEGORIES
        .iter()
        .map(|c| CategoryRow {
            key: c.key().to_string(),
            name: c.name().to_string(),
            icon: c.icon().to_string(),
            color: c.color().to_string(),
        })
        .collect();
    let message = rows
        .iter()
        .map(|r| format!("{:<10} {:<12} {}", r.key, r.name, r.color))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, rows))
}
