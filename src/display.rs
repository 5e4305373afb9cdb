//! Terminal output formatting for the non-interactive commands

use tabled::{settings::Style, Table, Tabled};

use crate::config::{OnboardPaths, Settings};
use crate::store::FormState;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Setting")]
    key: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(key: &'static str, value: impl ToString) -> Row {
    Row {
        key,
        value: value.to_string(),
    }
}

/// Paths and effective settings as a table
pub fn format_config(paths: &OnboardPaths, settings: &Settings) -> String {
    let rows = vec![
        row("Base directory", paths.base_dir().display()),
        row("Settings file", paths.settings_file().display()),
        row("Log directory", paths.log_dir().display()),
        row("Initialized", paths.is_initialized()),
        row("Partner URL", &settings.partner_url),
        row("Partner GUID", &settings.partner_guid),
        row("Redirect delay (s)", settings.redirect_delay_secs),
        row("Scroll threshold (rows)", settings.scroll_threshold),
        row("Open browser", settings.open_browser),
        row("Log level", &settings.log_level),
    ];

    Table::new(rows).with(Style::sharp()).to_string()
}

/// What a prefill put in the store, without secrets
pub fn format_prefill_summary(state: &FormState) -> String {
    let account = &state.account_info;
    let customer = &state.customer_info;

    let rows = vec![
        row("Name", account.full_name()),
        row("Email", &account.email),
        row("State", &account.state),
        row("Password set", !account.password.is_empty()),
        row("SSN", customer.ssn.masked(4)),
        row("Date of birth", &customer.date_of_birth),
        row("Consented", customer.has_consented()),
    ];

    Table::new(rows).with(Style::sharp()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::tests::valid_account;
    use crate::models::SecretText;
    use std::path::PathBuf;

    #[test]
    fn test_config_table_lists_settings() {
        let paths = OnboardPaths::with_base_dir(PathBuf::from("/tmp/onboard-test"));
        let table = format_config(&paths, &Settings::default());
        assert!(table.contains("Partner GUID"));
        assert!(table.contains("BTW1135HKQ8Y"));
        assert!(table.contains("config.json"));
    }

    #[test]
    fn test_prefill_summary_hides_secrets() {
        let mut state = FormState {
            account_info: valid_account(),
            ..FormState::default()
        };
        state.customer_info.ssn = SecretText::new("123-45-6789");

        let table = format_prefill_summary(&state);
        assert!(table.contains("Jane Doe"));
        assert!(!table.contains("correct horse"));
        assert!(!table.contains("123-45"));
        assert!(table.contains("6789"));
    }
}
