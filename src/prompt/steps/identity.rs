//! Identity verification, line by line
//!
//! The terms are paged through a [`TermsViewer`]; paging to the end marks
//! both consents, anything short of that asks for them directly.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::error::OnboardResult;
use crate::models::{CustomerField, CustomerInfo, DocumentRef, SecretText};
use crate::prompt::console::Console;
use crate::wizard::legal::TERMS_TEXT;
use crate::wizard::{steps, TermsViewer, WizardContext};

use super::{report_errors, PAGE_HEIGHT, PAGE_WIDTH};

/// Identity step of the prompt wizard
pub struct IdentityPromptStep;

impl IdentityPromptStep {
    /// Collect identity details and consents, then submit or go back
    pub fn run<R: BufRead, W: Write>(
        console: &mut Console<R, W>,
        ctx: &mut WizardContext<'_>,
        scroll_threshold: usize,
        today: NaiveDate,
    ) -> OnboardResult<()> {
        console.heading("Step 2: Verify Your Identity")?;

        let mut draft = ctx.store.customer_info().clone();
        let mut fields = vec![
            CustomerField::Ssn,
            CustomerField::DateOfBirth,
            CustomerField::PhotoId,
            CustomerField::ProofOfAddress,
        ];
        let mut page_terms = true;

        loop {
            for field in &fields {
                ask_field(console, &mut draft, *field)?;
            }

            if page_terms {
                read_terms(console, &mut draft, scroll_threshold)?;
                page_terms = false;
            }
            if !draft.toc_agreement {
                draft.toc_agreement =
                    console.confirm("Do you agree to the Terms and Conditions?", false)?;
            }
            if !draft.poa_agreement {
                draft.poa_agreement =
                    console.confirm("Do you grant the Limited Power of Attorney?", false)?;
            }

            let choice = console.ask("Submit (s) or go back to account details (b)", "s")?;
            if choice.eq_ignore_ascii_case("b") || choice.eq_ignore_ascii_case("back") {
                steps::back_to_account(ctx);
                return Ok(());
            }

            match steps::submit_identity_on(ctx, draft.clone(), today) {
                Ok(()) => return Ok(()),
                Err(errors) => {
                    report_errors(console, errors.iter().map(|(f, m)| (f.label(), m)))?;
                    fields = errors
                        .iter()
                        .map(|(f, _)| f)
                        .filter(|f| {
                            !matches!(f, CustomerField::TocAgreement | CustomerField::PoaAgreement)
                        })
                        .collect();
                }
            }
        }
    }
}

fn ask_field<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    draft: &mut CustomerInfo,
    field: CustomerField,
) -> OnboardResult<()> {
    match field {
        CustomerField::Ssn => {
            let ssn = console.ask_secret("SSN (123-45-6789)", draft.ssn.expose())?;
            draft.ssn = SecretText::new(ssn);
        }
        CustomerField::DateOfBirth => {
            draft.date_of_birth = console.ask("Date of Birth (MM/DD/YYYY)", &draft.date_of_birth)?;
        }
        CustomerField::PhotoId => {
            let path = console.ask("Photo of ID (file path)", draft.photo_id.as_str())?;
            draft.photo_id = DocumentRef::new(path);
        }
        CustomerField::ProofOfAddress => {
            let path = console.ask(
                "Proof of Address (file path)",
                draft.proof_of_address.as_str(),
            )?;
            draft.proof_of_address = DocumentRef::new(path);
        }
        CustomerField::TocAgreement | CustomerField::PoaAgreement => {}
    }
    Ok(())
}

/// Page through the terms until the end or until the reader skips ahead
fn read_terms<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    draft: &mut CustomerInfo,
    scroll_threshold: usize,
) -> OnboardResult<()> {
    let mut viewer = TermsViewer::new(TERMS_TEXT, scroll_threshold);
    viewer.set_viewport(PAGE_WIDTH, PAGE_HEIGHT);
    viewer.scroll_customer(0, draft);

    console.blank()?;
    console.say("Please read the following agreements.")?;
    console.blank()?;

    loop {
        for line in viewer.visible_lines() {
            console.say(line)?;
        }

        if draft.has_consented() {
            console.blank()?;
            console.say("[x] Terms and Conditions    [x] Limited Power of Attorney")?;
            return Ok(());
        }

        let command = console.ask("-- more -- Enter: next page, 'end': jump to end, 'skip': stop reading", "")?;
        match command.to_lowercase().as_str() {
            "skip" | "s" => return Ok(()),
            "end" | "e" => {
                viewer.scroll_customer(viewer.total_lines() as isize, draft);
            }
            _ => {
                viewer.scroll_customer(PAGE_HEIGHT as isize, draft);
            }
        }
    }
}
