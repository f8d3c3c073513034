//! Creates an account from the terminal, e.g. the first administrator
//! before anyone can reach the registration page.

use crate::{
    db::db::Db,
    libs::{
        account::{self, RegisterOutcome},
        config::Config,
        messages::Message,
    },
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct AdduserArgs {
    #[arg(required = true)]
    username: String,
}

pub fn cmd(args: AdduserArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::init(&config.database)?;

    if account::username_taken(&db, &args.username)? {
        msg_bail_anyhow!(Message::UsernameTaken);
    }

    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PasswordsDoNotMatch.to_string())
        .interact()?;

    match account::register(&db, &args.username, &password, config.password_cost)? {
        RegisterOutcome::Registered(_) => {
            msg_success!(Message::UserCreated(args.username));
            Ok(())
        }
        RegisterOutcome::UsernameTaken => msg_bail_anyhow!(Message::UsernameTaken),
    }
}
