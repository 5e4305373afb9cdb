//! Letter-of-intent signature
//!
//! Validated by the agreement step but not kept in the store.

use chrono::NaiveDate;

use crate::validation::{self as v, FieldErrors, DATE_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgreementField {
    Signature,
    Date,
}

impl AgreementField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Signature => "Your Name",
            Self::Date => "Date",
        }
    }
}

/// Typed signature plus the (read-only) signing date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agreement {
    pub signature: String,
    pub agreement_date: String,
}

impl Agreement {
    /// Blank signature dated `today`
    pub fn dated(today: NaiveDate) -> Self {
        Self {
            signature: String::new(),
            agreement_date: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// Validate against the account holder's full name
    pub fn validate(&self, expected_name: &str) -> Result<(), FieldErrors<AgreementField>> {
        let mut errors = FieldErrors::new();

        errors.check(
            AgreementField::Signature,
            v::required(&self.signature, "Your Name"),
        );
        errors.check(
            AgreementField::Signature,
            v::max_len(&self.signature, 300, "Your Name"),
        );
        if !self.signature.trim().is_empty()
            && v::normalize_name(&self.signature) != v::normalize_name(expected_name)
        {
            errors.insert(
                AgreementField::Signature,
                format!("Type your full name exactly: {}", expected_name),
            );
        }

        errors.check(AgreementField::Date, v::required(&self.agreement_date, "Date"));
        errors.check(
            AgreementField::Date,
            v::optional(&self.agreement_date, |d| v::parse_date(d, "Date").map(|_| ())),
        );

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_dated_formats_today() {
        assert_eq!(Agreement::dated(today()).agreement_date, "03/09/2024");
    }

    #[test]
    fn test_signature_must_match_name() {
        let mut agreement = Agreement::dated(today());
        agreement.signature = "  jane   DOE ".into();
        assert!(agreement.validate("Jane Doe").is_ok());

        agreement.signature = "John Doe".into();
        let errors = agreement.validate("Jane Doe").unwrap_err();
        assert_eq!(
            errors.get(AgreementField::Signature),
            Some("Type your full name exactly: Jane Doe")
        );
    }

    #[test]
    fn test_blank_signature() {
        let errors = Agreement::dated(today()).validate("Jane Doe").unwrap_err();
        assert_eq!(
            errors.get(AgreementField::Signature),
            Some("Your Name is required")
        );
        assert!(!errors.contains(AgreementField::Date));
    }

    #[test]
    fn test_bad_date() {
        let agreement = Agreement {
            signature: "Jane Doe".into(),
            agreement_date: "3/9/24".into(),
        };
        let errors = agreement.validate("Jane Doe").unwrap_err();
        assert!(errors.contains(AgreementField::Date));
    }
}
