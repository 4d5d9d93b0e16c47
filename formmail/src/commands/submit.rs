use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use clap::Args;
use formmail_client_impl::{SubmissionClientConfig, SubmissionClientImpl};
use formmail_config::Config;
use formmail_form::{FormController, SubmitOutcome};
use formmail_models::contact::SubmissionField;
use url::Url;

/// Fill in the contact form from the terminal and send it
#[derive(Debug, Args)]
pub struct SubmitCommand {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    subject: Option<String>,
    #[arg(long)]
    message: Option<String>,
    /// Contact endpoint to post to instead of the configured one
    #[arg(long)]
    endpoint: Option<Url>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let endpoint = self.endpoint.clone().unwrap_or(config.client.endpoint);
        let client = SubmissionClientImpl::new(SubmissionClientConfig {
            endpoint: endpoint.into(),
        })?;
        let mut form = FormController::new(client);

        let mut stdin = std::io::stdin().lock();
        for field in SubmissionField::ALL {
            let value = match self.value(field) {
                Some(value) => value.to_owned(),
                None => prompt(&mut stdin, field)?,
            };
            form.on_field_change(field, value);
            form.on_field_blur(field);
            if let Some(hint) = form.hint(field) {
                eprintln!("{hint}");
            }
        }
        drop(stdin);

        match form.submit().await {
            SubmitOutcome::Sent => {
                if let Some(notification) = form.state().notification {
                    println!("{notification}");
                }
                Ok(())
            }
            SubmitOutcome::Failed => bail!("{}", form.state().error),
            SubmitOutcome::Skipped => bail!("Form is incomplete"),
        }
    }

    fn value(&self, field: SubmissionField) -> Option<&str> {
        match field {
            SubmissionField::Name => self.name.as_deref(),
            SubmissionField::Email => self.email.as_deref(),
            SubmissionField::Subject => self.subject.as_deref(),
            SubmissionField::Message => self.message.as_deref(),
        }
    }
}

fn prompt(stdin: &mut impl BufRead, field: SubmissionField) -> anyhow::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{}: ", field.label())?;
    stderr.flush()?;

    let mut line = String::new();
    stdin
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {field}"))?;
    Ok(line.trim_end_matches(['\r', '\n']).into())
}
