//! Step submission rules
//!
//! Each step validates its draft; on success it dispatches to the store and
//! then advances the controller. On failure nothing changes and the field
//! errors go back to the caller for inline display.

use chrono::{Local, NaiveDate};

use super::{Step, WizardContext};
use crate::models::{
    AccountField, AccountInfo, Agreement, AgreementField, CustomerField, CustomerInfo,
};
use crate::store::Action;
use crate::validation::FieldErrors;

/// Submit the account-creation step
pub fn submit_account(
    ctx: &mut WizardContext<'_>,
    info: AccountInfo,
) -> Result<(), FieldErrors<AccountField>> {
    if let Err(errors) = info.validate() {
        tracing::debug!(step = %Step::Account, errors = errors.len(), "submit rejected");
        return Err(errors);
    }

    ctx.store.dispatch(Action::UpdateAccountInfo(info));
    ctx.wizard.set_active_step(Step::Identity.index());
    Ok(())
}

/// Submit the identity step, checking the date of birth against today
pub fn submit_identity(
    ctx: &mut WizardContext<'_>,
    info: CustomerInfo,
) -> Result<(), FieldErrors<CustomerField>> {
    submit_identity_on(ctx, info, Local::now().date_naive())
}

/// Submit the identity step with an explicit "today"
pub fn submit_identity_on(
    ctx: &mut WizardContext<'_>,
    info: CustomerInfo,
    today: NaiveDate,
) -> Result<(), FieldErrors<CustomerField>> {
    if let Err(errors) = info.validate_on(today) {
        tracing::debug!(step = %Step::Identity, errors = errors.len(), "submit rejected");
        return Err(errors);
    }

    ctx.store.dispatch(Action::UpdateCustomerInfo(info));
    ctx.wizard.set_active_step(Step::Agreement.index());
    Ok(())
}

/// The identity step's "Back" control
pub fn back_to_account(ctx: &mut WizardContext<'_>) {
    ctx.wizard.set_active_step(Step::Account.index());
}

/// Submit the letter of intent; the signature must match the account name
pub fn submit_agreement(
    ctx: &mut WizardContext<'_>,
    agreement: &Agreement,
) -> Result<(), FieldErrors<AgreementField>> {
    let expected = ctx.store.account_info().full_name();
    if let Err(errors) = agreement.validate(&expected) {
        tracing::debug!(step = %Step::Agreement, errors = errors.len(), "submit rejected");
        return Err(errors);
    }

    ctx.wizard.set_active_step(Step::Complete.index());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::tests::valid_account;
    use crate::models::customer::tests::valid_customer;
    use crate::store::FormStore;
    use crate::wizard::WizardController;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_account_advances_and_is_stored() {
        let mut store = FormStore::new();
        let mut wizard = WizardController::new();
        let mut ctx = WizardContext::new(&mut store, &mut wizard);

        submit_account(&mut ctx, valid_account()).unwrap();

        assert_eq!(wizard.active_step(), 1);
        assert_eq!(store.account_info(), &valid_account());
    }

    #[test]
    fn test_invalid_email_blocks_account_submit() {
        let mut store = FormStore::new();
        let mut wizard = WizardController::new();
        let mut ctx = WizardContext::new(&mut store, &mut wizard);

        let mut info = valid_account();
        info.email = "jane@@example".into();
        let errors = submit_account(&mut ctx, info).unwrap_err();

        assert!(errors.contains(AccountField::Email));
        assert_eq!(wizard.active_step(), 0);
        assert_eq!(store.dispatch_count(), 0);
        assert_eq!(store.account_info(), &AccountInfo::default());
    }

    #[test]
    fn test_identity_requires_both_consents() {
        let dir = TempDir::new().unwrap();
        let mut store = FormStore::new();
        let mut wizard = WizardController::new();
        wizard.set_active_step(1);
        let mut ctx = WizardContext::new(&mut store, &mut wizard);

        let mut info = valid_customer(dir.path());
        info.toc_agreement = false;
        let errors = submit_identity_on(&mut ctx, info, today()).unwrap_err();
        assert!(errors.contains(CustomerField::TocAgreement));
        assert_eq!(ctx.wizard.active_step(), 1);

        submit_identity_on(&mut ctx, valid_customer(dir.path()), today()).unwrap();
        assert_eq!(wizard.active_step(), 2);
        assert!(store.customer_info().has_consented());
    }

    #[test]
    fn test_back_returns_to_account_without_dispatch() {
        let mut store = FormStore::new();
        let mut wizard = WizardController::new();
        wizard.set_active_step(1);
        let mut ctx = WizardContext::new(&mut store, &mut wizard);

        back_to_account(&mut ctx);

        assert_eq!(wizard.active_step(), 0);
        assert_eq!(store.dispatch_count(), 0);
    }

    #[test]
    fn test_agreement_checks_signature_against_store() {
        let mut store = FormStore::new();
        store.dispatch(Action::UpdateAccountInfo(valid_account()));
        let mut wizard = WizardController::new();
        wizard.set_active_step(2);
        let mut ctx = WizardContext::new(&mut store, &mut wizard);

        let mut agreement = Agreement::dated(today());
        agreement.signature = "Someone Else".into();
        assert!(submit_agreement(&mut ctx, &agreement).is_err());
        assert_eq!(ctx.wizard.active_step(), 2);

        agreement.signature = "Jane Doe".into();
        submit_agreement(&mut ctx, &agreement).unwrap();
        assert_eq!(wizard.current(), Some(Step::Complete));
    }
}
