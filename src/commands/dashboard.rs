use crate::commands::list::render_table;
use crate::commands::{open_session, Out};
use crate::presentation::Presentation;
use crate::summary::{
    highlight_summary, transaction_rows, HighlightCard, HighlightSummary, TransactionRow,
};
use crate::{Config, Result};
use chrono::{Local, TimeZone};
use serde::Serialize;

/// The dashboard: the three highlight cards followed by the transaction list.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub highlights: HighlightSummary,
    pub transactions: Vec<TransactionRow>,
}

/// Handles `gofin dashboard`. Everything is recomputed from the stored transactions.
pub async fn dashboard(config: Config) -> Result<Out<Dashboard>> {
    dashboard_in(config, &Local).await
}

async fn dashboard_in<Tz: TimeZone>(config: Config, tz: &Tz) -> Result<Out<Dashboard>> {
    let session = open_session(&config).await?;
    let user = session.require_user()?.clone();
    let transactions = session.load_transactions().await?;
    let presentation = config.presentation();

    let dashboard = Dashboard {
        highlights: highlight_summary(&transactions, &presentation, tz),
        transactions: transaction_rows(&transactions, &presentation, tz),
    };
    let message = format!(
        "{}\n\n{}\n\n{}",
        user.name(),
        render_highlights(&dashboard.highlights, &presentation),
        render_table(&dashboard.transactions, &presentation)
    );
    Ok(Out::new(message, dashboard))
}

fn render_highlights(summary: &HighlightSummary, presentation: &Presentation) -> String {
    let cards: [(&str, &HighlightCard); 3] = [
        (presentation.entries_title(), &summary.entries),
        (presentation.expenses_title(), &summary.expenses),
        (presentation.total_title(), &summary.total),
    ];
    let amount_width = cards
        .iter()
        .map(|(_, c)| c.amount_formatted.chars().count())
        .max()
        .unwrap_or_default();
    cards
        .iter()
        .map(|(title, card)| {
            format!(
                "{title:<8}  {:>amount_width$}  {}",
                card.amount_formatted, card.last_transaction
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
