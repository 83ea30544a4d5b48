use crate::commands::{open_session, Out};
use crate::model::CATEGORIES;
use crate::presentation::Presentation;
use crate::summary::{category_breakdown, CategoryBreakdown, SelectedMonth};
use crate::{Config, Result};
use chrono::{Local, TimeZone};
use serde::Serialize;

/// A month's expenses by category.
#[derive(Debug, Clone, Serialize)]
pub struct Resume {
    /// `YYYY-MM`
    pub month: String,
    /// e.g. `outubro, 2026`
    pub label: String,
    pub categories: Vec<CategoryBreakdown>,
}

/// Handles `gofin resume`: breaks down the expenses of `month`, in the local time zone, by
/// category.
pub async fn resume(config: Config, month: SelectedMonth) -> Result<Out<Resume>> {
    resume_in(config, month, &Local).await
}

async fn resume_in<Tz: TimeZone>(
    config: Config,
    month: SelectedMonth,
    tz: &Tz,
) -> Result<Out<Resume>> {
    let session = open_session(&config).await?;
    let transactions = session.load_transactions().await?;
    let presentation = config.presentation();

    let resume = Resume {
        month: month.to_string(),
        label: month.label(&presentation),
        categories: category_breakdown(&transactions, &month, CATEGORIES, &presentation, tz),
    };
    let message = render(&resume, &presentation);
    Ok(Out::new(message, resume))
}

fn render(resume: &Resume, presentation: &Presentation) -> String {
    if resume.categories.is_empty() {
        return format!("{}\n\n{}", resume.label, presentation.no_transactions());
    }
    let name_width = resume
        .categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or_default();
    let amount_width = resume
        .categories
        .iter()
        .map(|c| c.total_formatted.chars().count())
        .max()
        .unwrap_or_default();
    let rows = resume
        .categories
        .iter()
        .map(|c| {
            format!(
                "{:<name_width$}  {:>amount_width$}  {:>4}",
                c.name, c.total_formatted, c.percent_formatted
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n\n{rows}", resume.label)
}
