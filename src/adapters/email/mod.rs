//! Email adapters (lettre SMTP).

mod smtp_mailer;

pub use smtp_mailer::SmtpMailer;
