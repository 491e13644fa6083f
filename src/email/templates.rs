use anyhow::{Context, Result};
use tera::Tera;

const DEFAULT_TEMPLATE_NAME: &str = "password_reset.txt";
const DEFAULT_TEMPLATE: &str = "Hello, your password has been reset. Your new temporary password is: {{ password }}. Please login and change it immediately.";

/// Composes the body of the email that delivers a new password.
pub trait EmailTemplate: Send + Sync {
    fn render(&self, email: &str, password: &str) -> Result<String>;
}

impl<F> EmailTemplate for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn render(&self, email: &str, password: &str) -> Result<String> {
        Ok(self(email, password))
    }
}

/// The plain text body used when no custom template is configured.
pub struct DefaultTemplate {
    tera: Tera,
}

impl DefaultTemplate {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE)
            .context("Failed to parse default password reset template.")?;

        Ok(Self { tera })
    }
}

impl EmailTemplate for DefaultTemplate {
    fn render(&self, email: &str, password: &str) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("email", email);
        context.insert("password", password);

        self.tera
            .render(DEFAULT_TEMPLATE_NAME, &context)
            .context("Failed to render password reset template.")
    }
}
