//! Prompt wizard steps
//!
//! Individual steps in the line-oriented wizard flow.

pub mod account;
pub mod agreement;
pub mod identity;

use std::io::{BufRead, Write};

use crate::error::OnboardResult;
use crate::prompt::console::Console;

pub use account::AccountPromptStep;
pub use agreement::AgreementPromptStep;
pub use identity::IdentityPromptStep;

/// Column width legal text is wrapped to
pub const PAGE_WIDTH: usize = 76;

/// Lines of legal text shown per page
pub const PAGE_HEIGHT: usize = 20;

/// Print field errors as `Label: message` lines
pub(crate) fn report_errors<'a, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    errors: impl Iterator<Item = (&'static str, &'a str)>,
) -> OnboardResult<()> {
    console.blank()?;
    console.say("Please fix the following:")?;
    for (label, message) in errors {
        console.say(format!("  {}: {}", label, message))?;
    }
    console.blank()
}
