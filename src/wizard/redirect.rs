//! Partner redirect
//!
//! Builds the credit-monitoring enrollment URL from the collected account
//! fields and times the automatic hand-off on the completion step.

use std::process::Command;
use std::time::{Duration, Instant};

use url::Url;

use crate::config::Settings;
use crate::error::{OnboardError, OnboardResult};
use crate::models::AccountInfo;

/// Turn each whitespace character into a space so the form encoder writes
/// one `+` per character; only the ends are trimmed
fn escape_whitespace(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}

/// Build the partner URL with the account holder's details as query params
pub fn build_redirect_url(settings: &Settings, account: &AccountInfo) -> OnboardResult<Url> {
    let phone: String = account.phone.chars().filter(|c| *c != '-').collect();

    let params = [
        ("GUID", settings.partner_guid.clone()),
        ("firstname", escape_whitespace(&account.first_name)),
        ("lastname", escape_whitespace(&account.last_name)),
        ("email", account.email.trim().to_string()),
        ("phone", escape_whitespace(&phone)),
        ("bill_address", escape_whitespace(&account.address)),
        ("bill_city", escape_whitespace(&account.city)),
        ("bill_state", account.state.trim().to_string()),
        ("bill_zip", account.zip.trim().to_string()),
    ];

    let url = Url::parse_with_params(&settings.partner_url, &params)?;
    Ok(url)
}

/// Hand the URL to the platform's default browser
pub fn open_in_browser(url: &Url) -> OnboardResult<()> {
    let target = url.as_str();

    #[cfg(target_os = "macos")]
    let status = Command::new("open").arg(target).status();
    #[cfg(target_os = "windows")]
    let status = Command::new("cmd").args(["/C", "start", "", target]).status();
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let status = Command::new("xdg-open").arg(target).status();

    match status {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(OnboardError::Redirect(format!(
            "Browser launcher exited with {}",
            s
        ))),
        Err(e) => Err(OnboardError::Redirect(format!(
            "Failed to launch browser: {}",
            e
        ))),
    }
}

/// One-shot timer for the automatic redirect
///
/// Fires once when the delay elapses, or immediately on "leave now";
/// after firing it never fires again.
#[derive(Debug, Clone, Copy)]
pub struct RedirectTimer {
    deadline: Instant,
    fired: bool,
}

impl RedirectTimer {
    /// Arm the timer at `now`
    pub fn arm(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
            fired: false,
        }
    }

    /// Returns true exactly once, on the first poll at or after the deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        tracing::info!("automatic redirect fired");
        true
    }

    /// Manual override; returns true if this call fired the redirect
    pub fn leave_now(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        tracing::info!("redirect fired by leave-now");
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Time left before the automatic redirect
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::tests::valid_account;

    #[test]
    fn test_url_contains_escaped_fields() {
        let mut account = valid_account();
        account.address = "12  Main\tSt".into();
        account.phone = "555-123-4567".into();

        let url = build_redirect_url(&Settings::default(), &account).unwrap();

        assert_eq!(
            url.as_str(),
            "http://app.myryze.com/redirect.asp?GUID=BTW1135HKQ8Y&firstname=Jane&lastname=Doe\
             &email=jane.doe%40example.com&phone=5551234567&bill_address=12++Main+St\
             &bill_city=San+Luis+Obispo&bill_state=CA&bill_zip=93401"
        );
    }

    #[test]
    fn test_each_whitespace_character_is_escaped() {
        let mut account = valid_account();
        account.first_name = " Mary  Ann ".into();
        account.city = "San\tLuis".into();

        let url = build_redirect_url(&Settings::default(), &account).unwrap();

        assert!(url.as_str().contains("firstname=Mary++Ann&"));
        assert!(url.as_str().contains("bill_city=San+Luis&"));
    }

    #[test]
    fn test_query_values_round_trip() {
        let url = build_redirect_url(&Settings::default(), &valid_account()).unwrap();
        let city = url
            .query_pairs()
            .find(|(k, _)| k == "bill_city")
            .map(|(_, v)| v.into_owned());
        assert_eq!(city.as_deref(), Some("San Luis Obispo"));
    }

    #[test]
    fn test_bad_partner_url() {
        let settings = Settings {
            partner_url: "not a url".into(),
            ..Settings::default()
        };
        let err = build_redirect_url(&settings, &valid_account()).unwrap_err();
        assert!(matches!(err, OnboardError::Redirect(_)));
    }

    #[test]
    fn test_timer_fires_once_after_delay() {
        let start = Instant::now();
        let mut timer = RedirectTimer::arm(start, Duration::from_secs(8));

        assert!(!timer.poll(start + Duration::from_millis(7_999)));
        assert_eq!(
            timer.remaining(start + Duration::from_secs(3)),
            Duration::from_secs(5)
        );
        assert!(timer.poll(start + Duration::from_secs(8)));
        assert!(!timer.poll(start + Duration::from_secs(9)));
        assert!(!timer.poll(start + Duration::from_secs(60)));
        assert!(timer.has_fired());
    }

    #[test]
    fn test_leave_now_preempts_timer() {
        let start = Instant::now();
        let mut timer = RedirectTimer::arm(start, Duration::from_secs(8));

        assert!(timer.leave_now());
        assert!(!timer.leave_now());
        assert!(!timer.poll(start + Duration::from_secs(8)));
    }
}
