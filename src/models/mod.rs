//! Core data models for onboard-cli
//!
//! The two records held by the form store (account info, customer info),
//! plus the letter-of-intent signature and supporting value types.

pub mod account;
pub mod agreement;
pub mod customer;
pub mod document;
pub mod secret;

pub use account::{AccountField, AccountInfo, LOAN_AMOUNTS, US_STATES};
pub use agreement::{Agreement, AgreementField};
pub use customer::{CustomerField, CustomerInfo};
pub use document::DocumentRef;
pub use secret::SecretText;
