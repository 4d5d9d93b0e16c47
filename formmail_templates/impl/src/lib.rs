use std::sync::Arc;

use formmail_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    state: State,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            state: State::new()?,
        })
    }
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl State {
    fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template("base", BASE_TEMPLATE)?;

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)?;
        }

        Ok(Self(tera.into()))
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use formmail_templates_contracts::{ContactMessageTemplate, TemplateField};
    use pretty_assertions::assert_eq;

    use super::*;

    fn field(label: &str, value: &str) -> TemplateField {
        TemplateField {
            label: label.into(),
            value: value.into(),
        }
    }

    #[test]
    fn contact_message() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactMessageTemplate {
                heading: "New contact form submission".into(),
                fields: vec![field("Name", "Ann"), field("Message", "Hello there")],
            })
            .unwrap();

        // Assert
        assert!(result.contains("<h1>New contact form submission</h1>"));
        let name = result.find("<h2>Name</h2>").unwrap();
        let message = result.find("<h2>Message</h2>").unwrap();
        assert!(name < message);
        assert!(result.contains(">Ann</p>"));
        assert!(result.contains(">Hello there</p>"));
    }

    #[test]
    fn contact_message_escapes_values() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactMessageTemplate {
                heading: "Heading".into(),
                fields: vec![field("Message", "<script>alert(1)</script> & co")],
            })
            .unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(result.contains("&lt;script&gt;alert(1)"));
        assert!(result.contains("&amp; co"));
    }

    #[test]
    fn render_is_deterministic() {
        let sut = TemplateServiceImpl::new().unwrap();
        let template = ContactMessageTemplate {
            heading: "Heading".into(),
            fields: vec![field("Subject", "Hi")],
        };

        assert_eq!(
            sut.render(&template).unwrap(),
            sut.render(&template).unwrap()
        );
    }
}
