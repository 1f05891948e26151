//! Email service module for OTP delivery.
//!
//! Sends the one-time code over SMTP, configured for Gmail, using the
//! `lettre` crate with both plain text and HTML formats. When the SMTP
//! credentials are absent the mailer is simply not constructed and the auth
//! engine logs codes instead.
//!
//! # Environment Variables
//! - `GMAIL_USERNAME`: Gmail address to send emails from
//! - `GMAIL_APP_PASSWORD`: Gmail app password for authentication
//! - `EMAIL_FROM_NAME`: Display name for the sender

use async_trait::async_trait;
use lettre::{
    AsyncTransport, Tokio1Executor,
    message::{Message, MultiPart, SinglePart, header},
    transport::smtp::{
        AsyncSmtpTransport,
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};

use common::config;
use services::auth_service::{MailerError, OtpMailer};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    username: String,
}

impl SmtpMailer {
    /// Builds the mailer from the global configuration, or `None` when the
    /// Gmail credentials are not set.
    pub fn from_config() -> Option<Self> {
        let username = config::gmail_username();
        let password = config::gmail_app_password();
        if username.is_empty() || password.is_empty() {
            return None;
        }

        let tls_parameters = TlsParameters::new("smtp.gmail.com".to_string())
            .expect("Failed to create TLS parameters");

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay("smtp.gmail.com")
            .expect("Failed to create SMTP transport")
            .port(587)
            .tls(Tls::Required(tls_parameters))
            .credentials(Credentials::new(username.clone(), password))
            .build();

        Some(Self {
            transport,
            username,
        })
    }
}

#[async_trait]
impl OtpMailer for SmtpMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), MailerError> {
        let from_name = config::email_from_name();

        let email = Message::builder()
            .from(
                format!("{} <{}>", from_name, self.username)
                    .parse()
                    .map_err(|e| MailerError(format!("invalid sender address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| MailerError(format!("invalid recipient address: {e}")))?)
            .subject("Your Attendance System OTP")
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(format!(
                                "Hello,\n\n\
                                Your OTP for logging into the QR Attendance System is:\n\n\
                                {}\n\n\
                                This code will expire in 5 minutes.\n\n\
                                If you didn't request this, please ignore this email.\n\n\
                                Best regards,\n\
                                {}",
                                code, from_name
                            )),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<div style="font-family: Arial, sans-serif; padding: 20px;">
                                    <h2>Verification Code</h2>
                                    <p>Your OTP for logging into the QR Attendance System is:</p>
                                    <h1 style="color: #4f46e5; letter-spacing: 5px;">{}</h1>
                                    <p>This code will expire in 5 minutes.</p>
                                    <p>If you didn't request this, please ignore this email.</p>
                                </div>"#,
                                code
                            )),
                    ),
            )
            .map_err(|e| MailerError(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| MailerError(e.to_string()))
    }
}
