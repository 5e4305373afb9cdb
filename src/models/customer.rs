//! Customer identity record
//!
//! Collected by the identity step: SSN, date of birth, two document
//! references and the two consent flags.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::document::DocumentRef;
use super::secret::SecretText;
use crate::validation::{self as v, FieldErrors};

/// Fields of the identity step, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerField {
    Ssn,
    DateOfBirth,
    PhotoId,
    ProofOfAddress,
    TocAgreement,
    PoaAgreement,
}

impl CustomerField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ssn => "SSN",
            Self::DateOfBirth => "Date of Birth",
            Self::PhotoId => "Photo of ID",
            Self::ProofOfAddress => "Proof of Address",
            Self::TocAgreement => "Terms and Conditions",
            Self::PoaAgreement => "Limited Power of Attorney",
        }
    }
}

/// Customer identity fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerInfo {
    pub ssn: SecretText,
    pub date_of_birth: String,
    #[serde(rename = "photoIdPath")]
    pub photo_id: DocumentRef,
    #[serde(rename = "proofOfAddressPath")]
    pub proof_of_address: DocumentRef,
    /// Terms and conditions accepted
    #[serde(rename = "toc_agreement_ind")]
    pub toc_agreement: bool,
    /// Limited power of attorney granted
    #[serde(rename = "poa_agreement_ind")]
    pub poa_agreement: bool,
}

impl CustomerInfo {
    /// Both consent flags are set
    pub fn has_consented(&self) -> bool {
        self.toc_agreement && self.poa_agreement
    }

    /// Validate against today's date
    pub fn validate(&self) -> Result<(), FieldErrors<CustomerField>> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validate with an explicit "today" for the date-of-birth check
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), FieldErrors<CustomerField>> {
        use CustomerField as F;

        let mut errors = FieldErrors::new();

        errors.check(F::Ssn, v::required(self.ssn.expose(), "SSN"));
        errors.check(F::Ssn, v::optional(self.ssn.expose(), v::ssn));

        errors.check(F::DateOfBirth, v::required(&self.date_of_birth, "Date of Birth"));
        errors.check(
            F::DateOfBirth,
            v::optional(&self.date_of_birth, |dob| {
                let date = v::parse_date(dob, "Date of Birth")?;
                if date > today {
                    Err("Date of Birth cannot be in the future".to_string())
                } else {
                    Ok(())
                }
            }),
        );

        errors.check(F::PhotoId, self.photo_id.check("Photo of ID"));
        errors.check(F::ProofOfAddress, self.proof_of_address.check("Proof of Address"));

        if !self.toc_agreement {
            errors.insert(F::TocAgreement, "You must agree to the Terms and Conditions");
        }
        if !self.poa_agreement {
            errors.insert(
                F::PoaAgreement,
                "You must grant the Limited Power of Attorney",
            );
        }

        errors.into_result()
    }
}
