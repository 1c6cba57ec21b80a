use super::error::SubmissionError;
use crate::utils::config::Helpdesk;
use common::{
    snapshot::NOT_AVAILABLE,
    ticket::{SubmitOutcome, TicketSubmission},
};
use log::{error, warn};
use reqwest::{
    blocking::{multipart, Client},
    StatusCode,
};
use serde::Deserialize;
use std::{sync::Mutex, time::Duration};

const CATEGORY_TIMEOUT: u64 = 15;
const SUBMIT_TIMEOUT: u64 = 30;
const BODY_EXCERPT_LIMIT: usize = 200;

#[derive(Deserialize, Debug)]
struct Category {
    name: String,
    id: u32,
}

/// Client for the helpdesk ticket API. Owns the resolved category id as an
/// explicit write-once memo, constructed once per process and shared by every
/// submission
pub struct TicketClient {
    endpoint: String,
    api_key: String,
    auth_code: String,
    category_name: String,
    default_category: u32,
    default_email: String,
    client: Client,
    category_id: Mutex<Option<u32>>,
}

impl TicketClient {
    pub fn new(config: &Helpdesk) -> TicketClient {
        TicketClient {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            auth_code: config.auth_code.clone(),
            category_name: config.category.clone(),
            default_category: config.default_category,
            default_email: config.default_email.clone(),
            client: Client::new(),
            category_id: Mutex::new(None),
        }
    }

    /// Submit one ticket. Never errors, every failure mode collapses to an
    /// outcome message the form can show as-is. No retries, the user may
    /// resubmit manually
    pub fn submit(&self, ticket: &TicketSubmission) -> SubmitOutcome {
        // Email validation happens before any network traffic
        let mut email = ticket.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            email = self.default_email.clone();
        }
        if email.is_empty() || !email.contains('@') {
            return SubmitOutcome {
                success: false,
                message: String::from(
                    "Could not determine your email address. Please contact IT support directly.",
                ),
            };
        }

        let mut name = ticket.name.trim().to_string();
        if name.is_empty() {
            name = String::from("User");
        }

        let category = self.resolve_category();

        let mut form = multipart::Form::new()
            .text("subject", ticket.subject.clone())
            .text("text", render_description(ticket))
            .text("priority", ticket.priority.as_backend().to_string())
            .text("name", name)
            .text("email", email)
            .text("category", category.to_string());

        if let Some(png) = &ticket.screenshot {
            let part = multipart::Part::bytes(png.clone()).file_name("screenshot.png");
            let part = match part.mime_str("image/png") {
                Ok(result) => result,
                // A static mime string cannot fail to parse, resend untyped if it somehow does
                Err(_err) => multipart::Part::bytes(png.clone()).file_name("screenshot.png"),
            };
            form = form.part("attachments", part);
        }

        let res = match self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.api_key, Some(&self.auth_code))
            .timeout(Duration::from_secs(SUBMIT_TIMEOUT))
            .multipart(form)
            .send()
        {
            Ok(result) => result,
            Err(err) => {
                error!("[submission] Ticket POST failed: {err:?}");
                let message = if err.is_timeout() {
                    String::from("Request timed out. Please try again.")
                } else if err.is_connect() {
                    String::from("Connection error. Check your network and helpdesk endpoint URL.")
                } else {
                    format!("Unexpected error: {err}")
                };
                return SubmitOutcome {
                    success: false,
                    message,
                };
            }
        };

        let status = res.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            return SubmitOutcome {
                success: true,
                message: String::from("Ticket submitted successfully!"),
            };
        }

        let body = res.text().unwrap_or_default();
        let excerpt: String = body.chars().take(BODY_EXCERPT_LIMIT).collect();
        SubmitOutcome {
            success: false,
            message: format!("Server returned status {}: {excerpt}", status.as_u16()),
        }
    }

    /// Look up the configured category name, memoized for the process
    /// lifetime. Resolution is best-effort, any failure falls back to the
    /// default id so a broken categories endpoint never blocks a ticket
    pub fn resolve_category(&self) -> u32 {
        let mut cached = match self.category_id.lock() {
            Ok(result) => result,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(id) = *cached {
            return id;
        }

        match self.fetch_category_id() {
            Ok(id) => {
                *cached = Some(id);
                id
            }
            Err(err) => {
                warn!(
                    "[submission] Could not resolve category \"{}\": {err:?}. Using default id {}",
                    self.category_name, self.default_category
                );
                self.default_category
            }
        }
    }

    fn fetch_category_id(&self) -> Result<u32, SubmissionError> {
        let url = format!("{}/categories/", self.base_url());

        let res = match self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(&self.auth_code))
            .timeout(Duration::from_secs(CATEGORY_TIMEOUT))
            .send()
        {
            Ok(result) => result,
            Err(err) => {
                warn!("[submission] Failed to send category request: {err:?}");
                return Err(SubmissionError::CategoryRequest);
            }
        };

        if res.status() != StatusCode::OK {
            return Err(SubmissionError::CategoryNotOk);
        }

        let bytes = match res.bytes() {
            Ok(result) => result,
            Err(err) => {
                warn!("[submission] Failed to get category bytes: {err:?}");
                return Err(SubmissionError::CategoryRequest);
            }
        };

        let categories: Vec<Category> = match serde_json::from_slice(&bytes) {
            Ok(result) => result,
            Err(err) => {
                warn!("[submission] Failed to deserialize category response: {err:?}");
                return Err(SubmissionError::CategoryBadResponse);
            }
        };

        let want = self.category_name.trim().to_lowercase();
        for category in categories {
            if category.name.trim().to_lowercase() == want {
                return Ok(category.id);
            }
        }

        Err(SubmissionError::CategoryNoMatch)
    }

    /// Derive the API base from the ticket endpoint by dropping the trailing
    /// tickets segment
    fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if let Some(base) = endpoint.strip_suffix("/tickets") {
            return base.to_string();
        }

        match endpoint.rsplit_once('/') {
            Some((base, _)) => base.to_string(),
            None => endpoint.to_string(),
        }
    }
}

/// Append the fixed-format system information block beneath the user text
fn render_description(ticket: &TicketSubmission) -> String {
    let mut description = ticket.description.trim().to_string();
    if description.is_empty() {
        description = String::from("No description provided.");
    }

    let snapshot = &ticket.snapshot;
    format!(
        "{description}\n\n\
         --- System Information ---\n\
         Hostname: {}\n\
         Username: {}\n\
         Local IP: {}\n\
         Public IP: {}\n\
         MAC Address: {}\n\
         OS: {}\n\
         CPU Usage: {}\n\
         RAM Usage: {} (Total: {})\n\
         Logical Processors: {}\n\
         Disk Usage: {}\n\
         Uptime: {}\n\
         Battery: {}\n\
         Active Window: {}\n",
        label_value(&snapshot.hostname),
        label_value(&snapshot.username),
        label_value(&snapshot.local_ip),
        label_value(&snapshot.public_ip),
        label_value(&snapshot.mac_address),
        label_value(&snapshot.os_info),
        percent_value(snapshot.cpu_usage),
        percent_value(snapshot.ram_usage),
        label_value(&snapshot.total_ram),
        count_value(snapshot.logical_processors),
        percent_value(snapshot.disk_usage),
        label_value(&snapshot.uptime),
        label_value(&snapshot.battery),
        label_value(&snapshot.active_window),
    )
}

fn label_value(value: &str) -> &str {
    if value.is_empty() {
        return NOT_AVAILABLE;
    }
    value
}

fn percent_value(value: f32) -> String {
    if value <= 0.0 {
        return String::from(NOT_AVAILABLE);
    }
    format!("{value:.1}%")
}

fn count_value(value: usize) -> String {
    if value == 0 {
        return String::from(NOT_AVAILABLE);
    }
    value.to_string()
}
