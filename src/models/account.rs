//! Account-creation record
//!
//! Collected by the first wizard step and replaced wholesale on every submit.

use serde::{Deserialize, Serialize};

use super::secret::SecretText;
use crate::validation::{self as v, FieldErrors};

/// US state and DC codes offered by the state picker
pub const US_STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Loan amount ranges offered by the loan picker
pub const LOAN_AMOUNTS: &[&str] = &[
    "$0 - $50,000",
    "$50,000 - $75,000",
    "$75,000 - $100,000",
    "$100,000 - $125,000",
    "$125,000+",
];

pub const MIN_PASSWORD_LEN: usize = 8;

/// Fields of the account-creation step, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountField {
    FirstName,
    LastName,
    Email,
    Password,
    Phone,
    Address,
    City,
    State,
    Zip,
    RepName,
    RepEmail,
    RepPhone,
    Kw,
    LoanAmount,
}

impl AccountField {
    /// All fields in display order
    pub const ALL: [AccountField; 14] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Password,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::State,
        Self::Zip,
        Self::RepName,
        Self::RepEmail,
        Self::RepPhone,
        Self::Kw,
        Self::LoanAmount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Phone => "Phone",
            Self::Address => "Street Address",
            Self::City => "City",
            Self::State => "State",
            Self::Zip => "Zip",
            Self::RepName => "Referring Rep",
            Self::RepEmail => "Referring Rep Email",
            Self::RepPhone => "Rep Phone",
            Self::Kw => "kW",
            Self::LoanAmount => "Loan Amount",
        }
    }

    /// Whether the field is left blank unless the user fills it in
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            Self::RepName | Self::RepEmail | Self::RepPhone | Self::Kw | Self::LoanAmount
        )
    }
}

/// Account-creation fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub password: SecretText,
    pub rep_name: String,
    pub rep_email: String,
    pub rep_phone: String,
    /// Solar project size in kW
    #[serde(rename = "kW")]
    pub kw: String,
    #[serde(rename = "loan_amount")]
    pub loan_amount: String,
}

impl AccountInfo {
    /// First and last name joined by a single space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Text value of a field (password included, unmasked)
    pub fn value(&self, field: AccountField) -> &str {
        match field {
            AccountField::FirstName => &self.first_name,
            AccountField::LastName => &self.last_name,
            AccountField::Email => &self.email,
            AccountField::Password => self.password.expose(),
            AccountField::Phone => &self.phone,
            AccountField::Address => &self.address,
            AccountField::City => &self.city,
            AccountField::State => &self.state,
            AccountField::Zip => &self.zip,
            AccountField::RepName => &self.rep_name,
            AccountField::RepEmail => &self.rep_email,
            AccountField::RepPhone => &self.rep_phone,
            AccountField::Kw => &self.kw,
            AccountField::LoanAmount => &self.loan_amount,
        }
    }

    /// Set a field from user input
    pub fn set(&mut self, field: AccountField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AccountField::FirstName => self.first_name = value,
            AccountField::LastName => self.last_name = value,
            AccountField::Email => self.email = value,
            AccountField::Password => self.password = SecretText::new(value),
            AccountField::Phone => self.phone = value,
            AccountField::Address => self.address = value,
            AccountField::City => self.city = value,
            AccountField::State => self.state = value.trim().to_uppercase(),
            AccountField::Zip => self.zip = value,
            AccountField::RepName => self.rep_name = value,
            AccountField::RepEmail => self.rep_email = value,
            AccountField::RepPhone => self.rep_phone = value,
            AccountField::Kw => self.kw = value,
            AccountField::LoanAmount => self.loan_amount = value,
        }
    }

    /// Validate every field, collecting one message per offending field
    pub fn validate(&self) -> Result<(), FieldErrors<AccountField>> {
        use AccountField as F;

        let mut errors = FieldErrors::new();

        for field in F::ALL {
            if !field.is_optional() {
                errors.check(field, v::required(self.value(field), field.label()));
            }
        }

        errors.check(F::FirstName, v::max_len(&self.first_name, 300, "First Name"));
        errors.check(F::LastName, v::max_len(&self.last_name, 300, "Last Name"));
        errors.check(
            F::Email,
            v::optional(&self.email, |e| v::email(e, "Email")),
        );
        errors.check(F::Email, v::max_len(&self.email, 256, "Email"));
        errors.check(
            F::Password,
            v::optional(self.password.expose(), |p| {
                v::min_len(p, MIN_PASSWORD_LEN, "Password")
            }),
        );
        errors.check(F::Phone, v::optional(&self.phone, |p| v::phone(p, "Phone")));
        errors.check(F::Address, v::max_len(&self.address, 400, "Street Address"));
        errors.check(F::City, v::max_len(&self.city, 100, "City"));
        errors.check(F::State, v::optional(&self.state, check_state));
        errors.check(F::Zip, v::optional(&self.zip, v::zip));

        errors.check(F::RepName, v::max_len(&self.rep_name, 300, "Referring Rep"));
        errors.check(
            F::RepEmail,
            v::optional(&self.rep_email, |e| v::email(e, "Referring Rep Email")),
        );
        errors.check(
            F::RepEmail,
            v::max_len(&self.rep_email, 300, "Referring Rep Email"),
        );
        errors.check(
            F::RepPhone,
            v::optional(&self.rep_phone, |p| v::phone(p, "Rep Phone")),
        );
        errors.check(F::RepPhone, v::max_len(&self.rep_phone, 256, "Rep Phone"));
        errors.check(F::Kw, v::max_len(&self.kw, 400, "kW"));
        errors.check(F::LoanAmount, v::optional(&self.loan_amount, check_loan_amount));

        errors.into_result()
    }
}

fn check_state(code: &str) -> Result<(), String> {
    if US_STATES.iter().any(|(c, _)| c.eq_ignore_ascii_case(code)) {
        Ok(())
    } else {
        Err(format!("'{}' is not a US state code", code))
    }
}

fn check_loan_amount(amount: &str) -> Result<(), String> {
    if LOAN_AMOUNTS.contains(&amount) {
        Ok(())
    } else {
        Err("Pick one of the listed loan amounts".to_string())
    }
}
