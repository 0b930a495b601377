//! Outgoing mail settings.

use serde::{Deserialize, Serialize};

use crate::settings::schema::{FieldDescriptor, FieldKind, SettingsSchema, ValidationResult};

/// SMTP server and sender identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// Address of the outgoing SMTP server.
    pub smtp_host: String,

    /// Port of the SMTP server, usually 25.
    pub smtp_port: u16,

    /// Username for ESMTP authentication.
    pub smtp_userid: Option<String>,

    /// Password for the ESMTP user account.
    pub smtp_pass: Option<String>,

    /// Name used as the e-mail sender for generated mail.
    pub email_from_name: Option<String>,

    /// Return address for generated mail; also the destination of the
    /// site-wide contact form.
    pub email_from_address: Option<String>,

    /// Characterset used when sending e-mails.
    pub email_charset: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 25,
            smtp_userid: None,
            smtp_pass: None,
            email_from_name: None,
            email_from_address: None,
            email_charset: "utf-8".to_string(),
        }
    }
}

const MAIL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("smtp_host", "SMTP server", FieldKind::TextLine)
        .describe(
            "The address of your local SMTP (outgoing e-mail) server. Usually \
             'localhost', unless you use an external server to send e-mail.",
        )
        .required(),
    FieldDescriptor::new("smtp_port", "SMTP port", FieldKind::Int)
        .describe("The port of your local SMTP (outgoing e-mail) server. Usually '25'.")
        .required(),
    FieldDescriptor::new("smtp_userid", "ESMTP username", FieldKind::TextLine)
        .describe("Username for authentication to your e-mail server. Not required."),
    FieldDescriptor::new("smtp_pass", "ESMTP password", FieldKind::Password),
    FieldDescriptor::new("email_from_name", "Site 'From' name", FieldKind::TextLine)
        .describe("The site generates e-mail using this name as the e-mail sender.")
        .required(),
    FieldDescriptor::new("email_from_address", "Site 'From' address", FieldKind::TextLine)
        .describe(
            "The site generates e-mail using this address as the e-mail return \
             address. It is also used as the destination address for the \
             site-wide contact form.",
        )
        .required(),
    FieldDescriptor::new("email_charset", "E-mail characterset", FieldKind::TextLine)
        .describe("Characterset to use when sending e-mails.")
        .required(),
];

impl SettingsSchema for MailSettings {
    const RECORD: &'static str = "quill.mail";

    fn fields() -> &'static [FieldDescriptor] {
        MAIL_FIELDS
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if self.email_charset.trim().is_empty() {
            result.add_error("email_charset: must not be empty");
        }
        if let Some(address) = &self.email_from_address {
            if !address.is_empty() && !address.contains('@') {
                result.add_warning(format!(
                    "email_from_address: \"{address}\" does not look like an e-mail address"
                ));
            }
        }
        result
    }
}
