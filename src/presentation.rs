//! Locale-specific formatting of currency values, dates and the fixed dashboard labels.
//!
//! The aggregator only produces numbers and dates. Everything a person reads goes through
//! `Presentation`.

use crate::model::{Amount, FormError};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The supported display locales.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    /// Brazilian Portuguese, Brazilian real: `R$ 1.234,56`, `15 de outubro`.
    #[default]
    PtBr,
    /// US English, US dollar: `$1,234.56`, `October 15`.
    EnUs,
}

serde_plain::derive_display_from_serialize!(Locale);
serde_plain::derive_fromstr_from_deserialize!(Locale);

const PT_BR_MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const EN_US_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats values for display in a given `Locale`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    locale: Locale,
}

impl Presentation {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Formats a currency value with two decimal places and thousands grouping.
    ///
    /// Grouping goes through `f64`, so the cents are exact up to about 90 trillion. That covers
    /// any single `Amount::MAX` and sums of up to 90 of them; larger sums may be off in the
    /// cents.
    ///
    /// ```
    /// # use gofinances::{Locale, Presentation};
    /// # use rust_decimal::Decimal;
    /// let pt = Presentation::new(Locale::PtBr);
    /// assert_eq!(pt.currency(Decimal::new(-123456, 2)), "-R$ 1.234,56");
    /// let en = Presentation::new(Locale::EnUs);
    /// assert_eq!(en.currency(Decimal::new(123456, 2)), "$1,234.56");
    /// ```
    pub fn currency(&self, value: Decimal) -> String {
        let sign = if value.is_sign_negative() && !value.is_zero() {
            "-"
        } else {
            ""
        };
        let rounded = value
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let grouped = format_num::format_num!(",.2", rounded.to_f64().unwrap_or_default());
        match self.locale {
            Locale::PtBr => {
                let swapped: String = grouped
                    .chars()
                    .map(|c| match c {
                        ',' => '.',
                        '.' => ',',
                        other => other,
                    })
                    .collect();
                format!("{sign}R$ {swapped}")
            }
            Locale::EnUs => format!("{sign}${grouped}"),
        }
    }

    /// Formats a percentage rounded to the nearest integer, e.g. `25%`.
    pub fn percent(&self, percent: Decimal) -> String {
        let rounded = percent.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{}%", rounded.normalize())
    }

    /// The month's name, `month` is one-based.
    pub fn month_name(&self, month: u32) -> &'static str {
        let ix = (month.clamp(1, 12) - 1) as usize;
        match self.locale {
            Locale::PtBr => PT_BR_MONTHS[ix],
            Locale::EnUs => EN_US_MONTHS[ix],
        }
    }

    /// e.g. `15 de outubro` or `October 15`.
    pub fn day_and_month(&self, date: NaiveDate) -> String {
        let month = self.month_name(date.month());
        match self.locale {
            Locale::PtBr => format!("{} de {month}", date.day()),
            Locale::EnUs => format!("{month} {}", date.day()),
        }
    }

    /// e.g. `outubro, 2026` or `October, 2026`.
    pub fn month_and_year(&self, date: NaiveDate) -> String {
        format!("{}, {}", self.month_name(date.month()), date.year())
    }

    /// The two-digit day, month and year, e.g. `15/10/26` or `10/15/26`.
    pub fn short_date(&self, date: NaiveDate) -> String {
        match self.locale {
            Locale::PtBr => date.format("%d/%m/%y").to_string(),
            Locale::EnUs => date.format("%m/%d/%y").to_string(),
        }
    }

    /// Shown instead of a date when there are no transactions of a kind.
    pub fn no_transactions(&self) -> &'static str {
        match self.locale {
            Locale::PtBr => "Não há transações",
            Locale::EnUs => "No transactions",
        }
    }

    pub fn last_entry(&self, date: NaiveDate) -> String {
        match self.locale {
            Locale::PtBr => format!("Ultima entrada dia {}", self.day_and_month(date)),
            Locale::EnUs => format!("Last entry on {}", self.day_and_month(date)),
        }
    }

    pub fn last_expense(&self, date: NaiveDate) -> String {
        match self.locale {
            Locale::PtBr => format!("Ultima saída dia {}", self.day_and_month(date)),
            Locale::EnUs => format!("Last expense on {}", self.day_and_month(date)),
        }
    }

    /// The period covered by the total, from the first of the month up to `date`.
    pub fn total_interval(&self, date: NaiveDate) -> String {
        match self.locale {
            Locale::PtBr => format!("01 a {}", self.day_and_month(date)),
            Locale::EnUs => format!(
                "{} 1 to {}",
                self.month_name(date.month()),
                self.day_and_month(date)
            ),
        }
    }

    pub fn entries_title(&self) -> &'static str {
        match self.locale {
            Locale::PtBr => "Entradas",
            Locale::EnUs => "Entries",
        }
    }

    pub fn expenses_title(&self) -> &'static str {
        match self.locale {
            Locale::PtBr => "Saídas",
            Locale::EnUs => "Expenses",
        }
    }

    pub fn total_title(&self) -> &'static str {
        "Total"
    }

    /// The message shown when the register form is rejected.
    pub fn form_error(&self, error: &FormError) -> String {
        match self.locale {
            Locale::EnUs => error.to_string(),
            Locale::PtBr => match error {
                FormError::NameRequired => "O nome é obrigatório".to_string(),
                FormError::AmountRequired => "O valor é obrigatório".to_string(),
                FormError::AmountNotANumber(_) => "Informe um valor numérico".to_string(),
                FormError::AmountNotPositive(_) => "O valor não pode ser negativo".to_string(),
                FormError::AmountTooLarge(_) => format!(
                    "O valor não pode ser maior que {}",
                    self.currency(Amount::MAX.value())
                ),
                FormError::TypeRequired => "Selecione o tipo da transação".to_string(),
                FormError::CategoryRequired => "Selecione a categoria".to_string(),
                FormError::UnknownCategory(key) => format!("Categoria desconhecida '{key}'"),
            },
        }
    }
}
