use clap::Parser;
use gofinances::args::{Args, Command, SignInProvider};
use gofinances::auth::{
    AppleCredential, AppleProvider, GoogleAuthResult, GoogleProfile, GoogleProvider,
    LocalProvider,
};
use gofinances::model::{TransactionForm, User};
use gofinances::{commands, Config, ErrorType, IntoResult, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{e:?}");
            error!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().gofin_home().path();

    let _: () = match args.command() {
        Command::Init(init_args) => {
            commands::init(home, init_args.namespace(), init_args.locale())
                .await?
                .print()
        }

        Command::SignIn(provider) => {
            let config = load_config(home).await?;
            match provider {
                SignInProvider::Local(a) => {
                    let user = User::new(&a.id, &a.name, &a.email, a.photo.clone());
                    commands::sign_in(config, &LocalProvider::new(user))
                        .await?
                        .print()
                }
                SignInProvider::Google(a) => {
                    let profile = GoogleProfile {
                        id: a.id.clone(),
                        email: a.email.clone(),
                        name: a.name.clone(),
                        photo_url: a.photo_url.clone(),
                    };
                    let provider = GoogleProvider::new(GoogleAuthResult::Success(profile));
                    commands::sign_in(config, &provider).await?.print()
                }
                SignInProvider::Apple(a) => {
                    let credential = AppleCredential {
                        user: a.user.clone(),
                        email: a.email.clone(),
                        given_name: a.given_name.clone(),
                    };
                    let provider = AppleProvider::new(Some(credential));
                    commands::sign_in(config, &provider).await?.print()
                }
            }
        }

        Command::SignOut => commands::sign_out(load_config(home).await?)
            .await?
            .print(),

        Command::Whoami => commands::whoami(load_config(home).await?).await?.print(),

        Command::Register(register_args) => {
            let form = TransactionForm {
                name: register_args.name.clone(),
                amount: register_args.amount.clone(),
                transaction_type: register_args.transaction_type,
                category: register_args.category.clone(),
            };
            commands::register(load_config(home).await?, form)
                .await?
                .print()
        }

        Command::Dashboard => commands::dashboard(load_config(home).await?)
            .await?
            .print(),

        Command::List(list_args) => commands::list(load_config(home).await?, list_args.format())
            .await?
            .print(),

        Command::Resume(resume_args) => {
            commands::resume(load_config(home).await?, resume_args.selected_month())
                .await?
                .print()
        }

        Command::Categories => commands::categories()?.print(),
    };
    Ok(())
}

async fn load_config(home: &std::path::Path) -> Result<Config> {
    Config::load(home).await.pub_result(ErrorType::Config)
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                "gofinances",
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
