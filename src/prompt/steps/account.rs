//! Account creation, line by line

use std::io::{BufRead, Write};

use crate::error::OnboardResult;
use crate::models::{AccountField, AccountInfo, LOAN_AMOUNTS};
use crate::prompt::console::Console;
use crate::wizard::{steps, WizardContext};

use super::report_errors;

/// Account step of the prompt wizard
pub struct AccountPromptStep;

impl AccountPromptStep {
    /// Collect the account fields until they validate, then submit
    pub fn run<R: BufRead, W: Write>(
        console: &mut Console<R, W>,
        ctx: &mut WizardContext<'_>,
    ) -> OnboardResult<()> {
        console.heading("Step 1: Create Your Account")?;
        console.say("Press Enter to keep the value shown in brackets.")?;
        console.blank()?;

        let mut draft = ctx.store.account_info().clone();
        let mut fields = AccountField::ALL.to_vec();

        loop {
            for field in &fields {
                ask_field(console, &mut draft, *field)?;
            }

            match steps::submit_account(ctx, draft.clone()) {
                Ok(()) => return Ok(()),
                Err(errors) => {
                    report_errors(console, errors.iter().map(|(f, m)| (f.label(), m)))?;
                    fields = errors.iter().map(|(f, _)| f).collect();
                    // A blank answer must be able to drop a bad optional value
                    for field in fields.iter().filter(|f| f.is_optional()) {
                        draft.set(*field, "");
                    }
                }
            }
        }
    }
}

fn ask_field<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    draft: &mut AccountInfo,
    field: AccountField,
) -> OnboardResult<()> {
    let value = match field {
        AccountField::Password => {
            let prompt = format!("{} (at least 8 characters)", field.label());
            console.ask_secret(&prompt, draft.password.expose())?
        }
        AccountField::State => console.ask("State (2-letter code)", draft.value(field))?,
        AccountField::LoanAmount => ask_loan_amount(console, draft.value(field))?,
        _ if field.is_optional() => {
            let prompt = format!("{} (optional)", field.label());
            console.ask_optional(&prompt, draft.value(field))?
        }
        _ => console.ask(field.label(), draft.value(field))?,
    };

    draft.set(field, value);
    Ok(())
}

/// Numbered menu of loan ranges; a number picks, blank keeps the current one
/// and `-` clears it
fn ask_loan_amount<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    current: &str,
) -> OnboardResult<String> {
    console.say("Loan amount (optional):")?;
    for (i, amount) in LOAN_AMOUNTS.iter().enumerate() {
        console.say(format!("  {}. {}", i + 1, amount))?;
    }

    let answer = console.ask_optional("Select loan amount", current)?;
    let picked = answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| LOAN_AMOUNTS.get(i));

    Ok(picked.map(|s| s.to_string()).unwrap_or(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Action, FormStore};
    use crate::wizard::WizardController;
    use std::io::Cursor;

    const VALID: &str = "Jane\nDoe\njane.doe@example.com\ncorrect horse\n555-123-4567\n\
                         12 Main St\nSan Luis Obispo\nca\n93401\n\n\n\n\n2\n";

    #[test]
    fn test_collects_and_submits() {
        let mut store = FormStore::new();
        let mut wizard = WizardController::new();
        let mut ctx = WizardContext::new(&mut store, &mut wizard);
        let mut console = Console::new(Cursor::new(VALID.as_bytes().to_vec()), Vec::new());

        AccountPromptStep::run(&mut console, &mut ctx).unwrap();

        assert_eq!(wizard.active_step(), 1);
        let info = store.account_info();
        assert_eq!(info.state, "CA");
        assert_eq!(info.loan_amount, "$50,000 - $75,000");
        assert_eq!(info.password.expose(), "correct horse");
    }

    #[test]
    fn test_reasks_only_invalid_fields() {
        let script = VALID.replace("jane.doe@example.com", "jane.doe") + "jane@example.com\n";
        let mut store = FormStore::new();
        let mut wizard = WizardController::new();
        let mut ctx = WizardContext::new(&mut store, &mut wizard);
        let mut console = Console::new(Cursor::new(script.into_bytes()), Vec::new());

        AccountPromptStep::run(&mut console, &mut ctx).unwrap();

        assert_eq!(store.account_info().email, "jane@example.com");
        assert_eq!(store.dispatch_count(), 1);
    }

    #[test]
    fn test_blank_answer_drops_invalid_optional_field() {
        let script = VALID.replacen("93401\n\n\n", "93401\n\nbad\n", 1) + "\n";
        let mut store = FormStore::new();
        let mut wizard = WizardController::new();
        let mut ctx = WizardContext::new(&mut store, &mut wizard);
        let mut console = Console::new(Cursor::new(script.into_bytes()), Vec::new());

        AccountPromptStep::run(&mut console, &mut ctx).unwrap();

        assert_eq!(wizard.active_step(), 1);
        assert_eq!(store.account_info().rep_email, "");
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Referring Rep Email must be a valid email"));
        assert!(!output.contains("[bad]"));
    }

    #[test]
    fn test_dash_clears_prefilled_optional_field() {
        let mut store = FormStore::new();
        store.dispatch(Action::UpdateAccountInfo(AccountInfo {
            rep_phone: "555-987-6543".into(),
            ..AccountInfo::default()
        }));

        let script = VALID.replacen("93401\n\n\n\n", "93401\n\n\n-\n", 1);
        let mut wizard = WizardController::new();
        let mut ctx = WizardContext::new(&mut store, &mut wizard);
        let mut console = Console::new(Cursor::new(script.into_bytes()), Vec::new());

        AccountPromptStep::run(&mut console, &mut ctx).unwrap();

        assert_eq!(wizard.active_step(), 1);
        assert_eq!(store.account_info().rep_phone, "");
    }
}
