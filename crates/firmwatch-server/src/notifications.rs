// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use firmwatch_core::UpdateReport;

use crate::config::EmailSettings;

#[derive(Debug)]
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    admin_recipients: Vec<String>,
}

impl EmailNotifier {
    pub fn new(config: &EmailSettings) -> Result<Self> {
        let from: Mailbox = config
            .from_address
            .parse()
            .with_context(|| format!("Invalid from_address: {}", config.from_address))?;

        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .with_context(|| format!("Failed to create SMTP relay: {}", config.smtp_host))?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            transport,
            from,
            admin_recipients: config.admin_recipients.clone(),
        })
    }

    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        self.admin_recipients.clone()
    }

    /// Mails the outdated-device report to every admin recipient.
    pub async fn send_report(&self, report: &UpdateReport) -> Result<()> {
        let subject = format!(
            "[Firmwatch] {} device(s) require a firmware update",
            report.count
        );
        let body = render_report_html(report);

        self.send_to_all(&subject, &body).await
    }

    async fn send_to_all(&self, subject: &str, html_body: &str) -> Result<()> {
        for recipient in &self.admin_recipients {
            let to: Mailbox = match recipient.parse() {
                Ok(m) => m,
                Err(e) => {
                    error!(recipient = %recipient, error = %e, "Invalid recipient address, skipping");
                    continue;
                }
            };

            let message = Message::builder()
                .from(self.from.clone())
                .to(to)
                .subject(subject)
                .header(ContentType::TEXT_HTML)
                .body(html_body.to_owned())
                .context("Failed to build email message")?;

            match self.transport.send(message).await {
                Ok(_) => info!(recipient = %recipient, subject = %subject, "Email sent"),
                Err(e) => error!(recipient = %recipient, error = %e, "Failed to send email"),
            }
        }

        Ok(())
    }
}

/// Renders the report payload as a plain HTML table, one row per device.
fn render_report_html(report: &UpdateReport) -> String {
    let mut rows = String::new();
    for entry in &report.entries {
        rows.push_str(&format!(
            "<tr>\
             <td>{}</td>\
             <td style=\"color: #d9534f;\">{}</td>\
             <td style=\"color: #5cb85c;\"><b>{}</b></td>\
             <td>{}</td>\
             </tr>",
            escape_html(&entry.serial),
            escape_html(&entry.current_version),
            escape_html(&entry.expected_version),
            escape_html(&entry.last_check),
        ));
    }

    format!(
        "<h2>Firmware Update Report</h2>\
         <p>The following devices run firmware below the reference version:</p>\
         <table border=\"1\" cellpadding=\"6\" style=\"border-collapse: collapse;\">\
         <thead><tr>\
         <th>Serial</th><th>Current Version</th><th>Expected Version</th><th>Last Check</th>\
         </tr></thead>\
         <tbody>{rows}</tbody>\
         </table>\
         <p><i>Automated message from the Firmwatch fleet monitor.</i></p>"
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
