use crate::args::OutputFormat;
use crate::commands::{open_session, Out};
use crate::error::{ErrorType, IntoResult, Res};
use crate::model::TransactionType;
use crate::presentation::Presentation;
use crate::summary::{transaction_rows, TransactionRow};
use crate::{Config, Result};
use anyhow::{anyhow, Context};
use chrono::{Local, TimeZone};

/// Handles `gofin list`: every transaction of the signed in user in stored order, rendered as a
/// table, JSON or CSV.
pub async fn list(config: Config, format: OutputFormat) -> Result<Out<Vec<TransactionRow>>> {
    list_in(config, format, &Local).await
}

async fn list_in<Tz: TimeZone>(
    config: Config,
    format: OutputFormat,
    tz: &Tz,
) -> Result<Out<Vec<TransactionRow>>> {
    let session = open_session(&config).await?;
    let transactions = session.load_transactions().await?;
    let presentation = config.presentation();
    let rows = transaction_rows(&transactions, &presentation, tz);

    let message = match format {
        OutputFormat::Table => render_table(&rows, &presentation),
        OutputFormat::Json => serde_json::to_string_pretty(&rows)
            .context("Unable to serialize the transactions")
            .pub_result(ErrorType::Internal)?,
        OutputFormat::Csv => render_csv(&rows).pub_result(ErrorType::Internal)?,
    };
    Ok(Out::new(message, rows))
}

/// Renders one line per transaction. Expenses are prefixed with a minus sign.
pub(super) fn render_table(rows: &[TransactionRow], presentation: &Presentation) -> String {
    if rows.is_empty() {
        return presentation.no_transactions().to_string();
    }
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or_default();
    let category_width = rows
        .iter()
        .map(|r| r.category_name.chars().count())
        .max()
        .unwrap_or_default();

    rows.iter()
        .map(|r| {
            let sign = match r.transaction_type {
                TransactionType::Positive => "",
                TransactionType::Negative => "- ",
            };
            format!(
                "{}  {:<name_width$}  {:<category_width$}  {sign}{}",
                r.date, r.name, r.category_name, r.amount
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_csv(rows: &[TransactionRow]) -> Res<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["id", "date", "name", "type", "category", "amount"])
        .context("Unable to write the CSV header")?;
    for r in rows {
        let kind = r.transaction_type.to_string();
        writer
            .write_record([
                r.id.as_str(),
                r.date.as_str(),
                r.name.as_str(),
                kind.as_str(),
                r.category.as_str(),
                r.amount.as_str(),
            ])
            .with_context(|| format!("Unable to write transaction {} as CSV", r.id))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Unable to flush the CSV writer: {}", e.error()))?;
    let csv = String::from_utf8(bytes).context("The CSV output is not UTF-8")?;
    Ok(csv.trim_end().to_string())
}
