use formmail_models::contact::{ContactMessage, RenderedMessage};
use formmail_templates_contracts::{ContactMessageTemplate, TemplateField, TemplateService};

pub const HEADING: &str = "New contact form submission";

/// Render the text and markup bodies of a contact message.
///
/// Both bodies list the same label/value pairs in the same order. The text
/// body contains the values verbatim, the markup body contains them escaped.
pub fn render_message(
    template: &impl TemplateService,
    message: &ContactMessage,
) -> anyhow::Result<RenderedMessage> {
    let text = message
        .fields()
        .fold(String::new(), |mut text, (field, value)| {
            text.push_str(field.label());
            text.push_str(": \n");
            text.push_str(value);
            text.push_str(" \n \n");
            text
        });

    let markup = template.render(&ContactMessageTemplate {
        heading: HEADING.into(),
        fields: message
            .fields()
            .map(|(field, value)| TemplateField {
                label: field.label().into(),
                value: value.into(),
            })
            .collect(),
    })?;

    Ok(RenderedMessage {
        text,
        markup,
        subject: message.subject.clone().into_inner(),
    })
}
