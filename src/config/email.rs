//! Email configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (SMTP)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host (e.g. "smtp.gmail.com")
    pub smtp_host: String,

    /// SMTP port (587 for STARTTLS, 465 for TLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP authentication username
    pub smtp_username: String,

    /// SMTP authentication password
    pub smtp_password: SecretString,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.smtp_host.is_empty() {
            return Err(ValidationError::MissingRequired("SMTP_HOST"));
        }
        if self.smtp_port == 0 {
            return Err(ValidationError::InvalidSmtpPort);
        }
        if self.smtp_username.is_empty() {
            return Err(ValidationError::MissingRequired("SMTP_USERNAME"));
        }
        if self.smtp_password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SMTP_PASSWORD"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: SecretString::new(String::new()),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "tickets@ules.org".to_string()
}

fn default_from_name() -> String {
    "ULES Tickets".to_string()
}
