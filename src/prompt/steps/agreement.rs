//! Letter of intent, line by line

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::error::OnboardResult;
use crate::models::Agreement;
use crate::prompt::console::Console;
use crate::wizard::legal::{wrap_text, LETTER_OF_INTENT};
use crate::wizard::{steps, WizardContext};

use super::{report_errors, PAGE_WIDTH};

/// Agreement step of the prompt wizard
pub struct AgreementPromptStep;

impl AgreementPromptStep {
    /// Show the letter and ask for a typed signature until it matches
    pub fn run<R: BufRead, W: Write>(
        console: &mut Console<R, W>,
        ctx: &mut WizardContext<'_>,
        today: NaiveDate,
    ) -> OnboardResult<()> {
        console.heading("Step 3: Letter of Intent")?;
        for line in wrap_text(LETTER_OF_INTENT, PAGE_WIDTH) {
            console.say(line)?;
        }
        console.blank()?;

        let mut agreement = Agreement::dated(today);
        console.say(format!("Date: {}", agreement.agreement_date))?;

        loop {
            agreement.signature = console.ask("Type your full name to sign", &agreement.signature)?;
            match steps::submit_agreement(ctx, &agreement) {
                Ok(()) => return Ok(()),
                Err(errors) => {
                    report_errors(console, errors.iter().map(|(f, m)| (f.label(), m)))?;
                    agreement.signature.clear();
                }
            }
        }
    }
}
