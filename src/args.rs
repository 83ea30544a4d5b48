//! These structs provide the CLI interface for the gofin CLI.

use crate::model::TransactionType;
use crate::presentation::Locale;
use crate::summary::SelectedMonth;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// gofin: register income and expenses and see where your money goes.
///
/// Transactions are kept per signed in user in a local SQLite file. The dashboard shows your
/// total entries, expenses and balance, and `resume` breaks a month's expenses down by category.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and its configuration file.
    ///
    /// This is the first command you should run. By default the home directory is
    /// $HOME/gofinances, pass --gofin-home or set GOFIN_HOME to put it somewhere else.
    Init(InitArgs),
    /// Sign in with one of the identity providers.
    #[command(subcommand)]
    SignIn(SignInProvider),
    /// Sign out. Your transactions are kept.
    SignOut,
    /// Show who is signed in.
    Whoami,
    /// Register a new income or expense transaction.
    Register(RegisterArgs),
    /// Show the entries, expenses and total highlights followed by all transactions.
    Dashboard,
    /// List all transactions.
    List(ListArgs),
    /// Break a month's expenses down by category.
    Resume(ResumeArgs),
    /// List the categories a transaction can be registered in.
    Categories,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber EnvFilter documentation.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where gofinances data and configuration is held. Defaults to ~/gofinances
    #[arg(long, env = "GOFIN_HOME", default_value_t = default_gofin_home())]
    gofin_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, gofin_home: PathBuf) -> Self {
        Self {
            log_level,
            gofin_home: gofin_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn gofin_home(&self) -> &DisplayPath {
        &self.gofin_home
    }
}

/// Args for the `gofin init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The prefix of every storage key.
    #[arg(long)]
    namespace: Option<String>,

    /// The locale used for currency, dates and labels.
    #[arg(long, value_enum, default_value_t = Locale::PtBr)]
    locale: Locale,
}

impl InitArgs {
    pub fn new(namespace: Option<String>, locale: Locale) -> Self {
        Self { namespace, locale }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

/// The identity providers of `gofin sign-in`.
#[derive(Subcommand, Debug, Clone)]
pub enum SignInProvider {
    /// Sign in with a profile given on the command line.
    Local(LocalSignInArgs),
    /// Sign in with the profile returned by a Google sign-in.
    Google(GoogleSignInArgs),
    /// Sign in with the credential returned by Sign in with Apple.
    Apple(AppleSignInArgs),
}

/// Args for `gofin sign-in local`.
#[derive(Debug, Parser, Clone)]
pub struct LocalSignInArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// A URL to a profile picture.
    #[arg(long)]
    pub photo: Option<String>,
}

/// Args for `gofin sign-in google`.
#[derive(Debug, Parser, Clone)]
pub struct GoogleSignInArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub photo_url: Option<String>,
}

/// Args for `gofin sign-in apple`.
#[derive(Debug, Parser, Clone)]
pub struct AppleSignInArgs {
    /// The stable user identifier from the Apple credential.
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub email: Option<String>,
    /// Used as the display name and for the generated avatar.
    #[arg(long)]
    pub given_name: Option<String>,
}

/// Args for the `gofin register` command.
#[derive(Debug, Parser, Clone)]
pub struct RegisterArgs {
    /// What the transaction was, e.g. "Lunch".
    #[arg(long)]
    pub name: String,

    /// The amount, a positive number such as 32.90.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    /// "positive" for income, "negative" for an expense.
    #[arg(long = "type", value_enum)]
    pub transaction_type: Option<TransactionType>,

    /// The category key, see `gofin categories`.
    #[arg(long)]
    pub category: Option<String>,
}

/// How `gofin list` prints transactions.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Args for the `gofin list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ListArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `gofin resume` command.
#[derive(Debug, Parser, Clone)]
pub struct ResumeArgs {
    /// The month to break down, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<SelectedMonth>,

    /// Move this many months forward from the selected month.
    #[arg(long, default_value_t = 0)]
    next: u32,

    /// Move this many months back from the selected month.
    #[arg(long, default_value_t = 0)]
    prev: u32,
}

impl ResumeArgs {
    pub fn new(month: Option<SelectedMonth>, next: u32, prev: u32) -> Self {
        Self { month, next, prev }
    }

    pub fn month(&self) -> Option<SelectedMonth> {
        self.month
    }

    pub fn next(&self) -> u32 {
        self.next
    }

    pub fn prev(&self) -> u32 {
        self.prev
    }

    /// The month to break down: `month` (or the current month) moved by `next` and `prev`.
    pub fn selected_month(&self) -> SelectedMonth {
        let forward = i32::try_from(self.next).unwrap_or(i32::MAX);
        let back = i32::try_from(self.prev).unwrap_or(i32::MAX);
        self.month
            .unwrap_or_default()
            .shift(forward)
            .shift(-back)
    }
}

fn default_gofin_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("gofinances"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --gofin-home or GOFIN_HOME instead of relying on the default \
                gofinances home directory.",
            );
            PathBuf::from("gofinances")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
