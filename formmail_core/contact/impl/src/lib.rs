use std::sync::Arc;

use formmail_core_contact_contracts::{ContactSendMessageError, ContactService};
use formmail_email_contracts::{Email, EmailBody, EmailService};
use formmail_models::{
    contact::ContactMessage,
    email_address::{EmailAddress, EmailAddressWithName},
};
use formmail_templates_contracts::TemplateService;
use tracing::info;

pub use render::render_message;

mod render;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// The fixed recipient of every contact form notification.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<EmailS, Template> ContactServiceImpl<EmailS, Template> {
    pub fn new(email: EmailS, template: Template, config: ContactServiceConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<EmailS, Template> ContactService for ContactServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_message(&self, message: ContactMessage) -> Result<(), ContactSendMessageError> {
        let rendered = render_message(&self.template, &message)?;

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: rendered.subject,
            body: EmailBody::Alternative {
                text: rendered.text,
                html: rendered.markup,
            },
            reply_to: message.email.parse::<EmailAddress>().ok(),
        };

        self.email
            .send(email)
            .await
            .map_err(ContactSendMessageError::Transport)?;

        info!(subject = message.subject.as_str(), "contact message sent");
        Ok(())
    }
}
