use std::sync::Arc;

use anyhow::Context;
use formmail_api_rest::RestServer;
use formmail_config::Config;
use formmail_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use formmail_core_health_impl::{HealthServiceConfig, HealthServiceImpl};
use formmail_email_contracts::EmailService;
use formmail_templates_impl::TemplateServiceImpl;
use tracing::info;

use crate::email;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email)?;
    email
        .ping()
        .await
        .context("Failed to connect to SMTP server")?;

    let template = TemplateServiceImpl::new().context("Failed to load templates")?;

    let contact = ContactServiceImpl::new(
        email.clone(),
        template,
        ContactServiceConfig {
            recipient: Arc::new(config.contact.email),
        },
    );
    let health = HealthServiceImpl::new(
        email,
        HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    RestServer::new(health, contact)
        .serve(config.http.host, config.http.port)
        .await
}
