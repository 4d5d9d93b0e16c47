use clap::Subcommand;
use formmail_config::Config;
use formmail_email_contracts::{Email, EmailBody, EmailService};
use formmail_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: EmailBody::Alternative {
                text: "Email deliverability seems to be working!".into(),
                html: "<p>Email deliverability seems to be working!</p>".into(),
            },
            reply_to: None,
        })
        .await
}
