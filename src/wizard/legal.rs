//! Embedded legal text and the scroll-gated terms viewer
//!
//! Reaching the bottom of the terms (within `threshold` rows) counts as
//! having read them; the identity step then marks both consents.

use crate::models::CustomerInfo;

/// Terms and conditions, privacy policy and power of attorney shown on the
/// identity step
pub const TERMS_TEXT: &str = "\
CLIENT SERVICE AGREEMENT

1. Services. Wype Credit Restoration (\"Company\") will review your credit reports from all three \
credit bureaus, identify items that may be inaccurate, unverifiable or obsolete, and dispute those \
items on your behalf.

2. Your Responsibilities. You agree to provide accurate personal information and copies of your \
identification and proof of address. You acknowledge that once our services have begun, you will \
not apply for any new credit or miss a payment for the space of 30-45 days, thus negating the \
positive results of our work on your behalf.

3. No Guarantee. Company cannot guarantee the removal of any specific item. Credit bureaus are \
required to follow reasonable procedures to ensure that the information they report is accurate. \
However, mistakes may occur.

4. Satisfaction Terms. You may request a review of your file if, after the service period, you \
see less than an average of a 35 point increase across all 3 credit bureaus.

5. Right to Cancel. You may cancel this contract without penalty or obligation at any time before \
midnight of the 3rd business day after the date on which you signed the contract.

PRIVACY POLICY

6. Information We Collect. Certain features require you to submit personally identifiable \
information (\"PII\") about yourself as a condition of participation, including your name, \
address, telephone number, email address, date of birth and Social Security number.

7. How We Use PII. We use PII to provide the services you request, to communicate with you about \
your account, and to comply with applicable law.

8. Disclosure. We may disclose PII to credit bureaus and creditors in the course of disputing \
items, to our service providers, and when required by law or to respond to legal process or \
lawful requests, including from law enforcement.

9. Retention. We retain your PII for as long as you remain a customer and thereafter only for the \
period necessary to fulfill the purposes outlined in this Policy, unless a longer retention period \
is required or allowed by law.

10. Your Rights. Depending on where you live you may have the right to know what PII we hold, to \
request its deletion, and to opt out of its sale. We will not discriminate against you for \
exercising any of these rights.

LIMITED POWER OF ATTORNEY

11. Appointment. You appoint Company as your limited attorney-in-fact for the sole purpose of \
communicating with credit bureaus, creditors and collection agencies regarding the accuracy of \
items on your credit reports.

12. Scope. This limited power of attorney does not authorize Company to open accounts, sign loan \
documents, or move funds on your behalf.

13. Term. This limited power of attorney remains in effect until you cancel the services or \
revoke it in writing.

By checking the boxes below you agree to the Terms and Conditions and grant Company the Limited \
Power of Attorney described above.";

/// Sponsored credit repair letter of intent shown on the agreement step
pub const LETTER_OF_INTENT: &str = "\
SPONSORED CREDIT REPAIR AGREEMENT
Letter of Intent

This Agreement is made and entered into by and between you (\"Client\"), Solar Company, and Wype \
Credit Restoration (\"Credit Company\").

1. Services to Be Performed for Client
Rapid credit restoration.

2. Payment
- Solar Company will cover the cost of Credit Company's service ($3,000 value).
- Credit monitoring is required by Client for $24.95 per month.

3. Term of Agreement
After Client's credit score is sufficient to be approved for funding, Client promises to return to \
Solar Company. If Client does not return to Solar Company, Credit Company will bill Client for the \
full cost of service ($3,000). If necessary, proper steps will be taken to collect the balance due \
which may result in negative credit reporting.

In addition, you agree that you will NOT do the following during Credit Company's process:
  1. Apply for new credit resulting in new inquiries.
  2. Miss payments on any open and current account.
  3. Negotiate with creditors to settle debts unless disclosed to Credit Company.

If any of these criteria report for two consecutive months, the Client will be removed from the \
sponsored program at which point one of the options below will be presented:
  1. Client may enter a paid plan with Credit Company to continue work.
  -or-
  2. Credit Company will bill Client for full cost of service.

* By typing your name and date, you agree to all terms as stated in this Agreement.";

/// Word-wrap `text` to `width` columns, keeping blank lines
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let indent: String = paragraph.chars().take_while(|c| c.is_whitespace()).collect();
        let mut current = indent.clone();
        for word in paragraph.split_whitespace() {
            let current_len = current.chars().count();
            let word_len = word.chars().count();
            let needs_space = current_len > indent.chars().count();

            if needs_space && current_len + 1 + word_len > width {
                lines.push(std::mem::replace(&mut current, indent.clone()));
            } else if needs_space {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

/// Scrollable view over wrapped legal text
#[derive(Debug, Clone)]
pub struct TermsViewer {
    text: &'static str,
    lines: Vec<String>,
    width: usize,
    viewport: usize,
    offset: usize,
    threshold: usize,
}

impl TermsViewer {
    pub fn new(text: &'static str, threshold: usize) -> Self {
        Self {
            text,
            lines: Vec::new(),
            width: 0,
            viewport: 0,
            offset: 0,
            threshold,
        }
    }

    /// Update the visible area; rewraps when the width changes
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        if width != self.width {
            self.width = width;
            self.lines = wrap_text(self.text, width);
        }
        self.viewport = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport)
    }

    /// Scroll by `delta` rows (negative is up), clamped to the text
    pub fn scroll_by(&mut self, delta: isize) {
        let target = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.offset = target.min(self.max_offset());
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.viewport.max(1) as isize);
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-(self.viewport.max(1) as isize));
    }

    /// Whether the bottom edge of the view is within `threshold` rows of the
    /// end of the text; a view taller than the text is always at the bottom
    pub fn is_at_bottom(&self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        let total = self.lines.len();
        let bottom = (self.offset + self.viewport).min(total);
        bottom + self.threshold > total && bottom < total + self.threshold
    }

    /// Lines currently in view
    pub fn visible_lines(&self) -> &[String] {
        let end = (self.offset + self.viewport).min(self.lines.len());
        &self.lines[self.offset.min(end)..end]
    }

    /// Scroll and, when the bottom is reached, mark both consent flags
    ///
    /// Returns true if the flags were changed by this call.
    pub fn scroll_and_gate(&mut self, delta: isize, toc: &mut bool, poa: &mut bool) -> bool {
        self.scroll_by(delta);
        if self.is_at_bottom() && !(*toc && *poa) {
            *toc = true;
            *poa = true;
            tracing::debug!(offset = self.offset, "terms read to the bottom; consents marked");
            return true;
        }
        false
    }

    /// [`Self::scroll_and_gate`] over a customer record's consent flags
    pub fn scroll_customer(&mut self, delta: isize, info: &mut CustomerInfo) -> bool {
        self.scroll_and_gate(delta, &mut info.toc_agreement, &mut info.poa_agreement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "0\n1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n11\n12\n13\n14\n15\n16\n17\n18\n19";

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("the quick brown fox\n\n  jumps over", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "", "  jumps", "  over"]);
    }

    #[test]
    fn test_wrap_keeps_long_words() {
        let lines = wrap_text("supercalifragilistic ok", 5);
        assert_eq!(lines, vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut viewer = TermsViewer::new(TEXT, 5);
        viewer.set_viewport(40, 4);
        assert_eq!(viewer.total_lines(), 20);

        viewer.scroll_by(-3);
        assert_eq!(viewer.offset(), 0);
        viewer.scroll_by(100);
        assert_eq!(viewer.offset(), 16);
        assert_eq!(viewer.visible_lines(), ["16", "17", "18", "19"]);
    }

    #[test]
    fn test_bottom_threshold() {
        let mut viewer = TermsViewer::new(TEXT, 5);
        viewer.set_viewport(40, 4);

        // bottom edge at row 15: 20 - 5 < 15 is false
        viewer.scroll_by(11);
        assert!(!viewer.is_at_bottom());

        // bottom edge at row 16: within 5 rows of 20
        viewer.scroll_by(1);
        assert!(viewer.is_at_bottom());
    }

    #[test]
    fn test_scrolling_to_bottom_marks_both_consents() {
        let mut viewer = TermsViewer::new(TEXT, 5);
        viewer.set_viewport(40, 4);
        let mut info = CustomerInfo::default();

        assert!(!viewer.scroll_customer(3, &mut info));
        assert!(!info.toc_agreement && !info.poa_agreement);

        assert!(viewer.scroll_customer(10, &mut info));
        assert!(info.toc_agreement && info.poa_agreement);
    }

    #[test]
    fn test_gate_does_not_override_manual_state_once_consented() {
        let mut viewer = TermsViewer::new(TEXT, 5);
        viewer.set_viewport(40, 4);
        let mut info = CustomerInfo {
            toc_agreement: true,
            poa_agreement: true,
            ..CustomerInfo::default()
        };
        assert!(!viewer.scroll_customer(100, &mut info));
    }

    #[test]
    fn test_text_shorter_than_view_counts_as_read() {
        let mut viewer = TermsViewer::new(TEXT, 5);
        viewer.set_viewport(40, 30);
        assert_eq!(viewer.offset(), 0);
        assert!(viewer.is_at_bottom());

        let mut info = CustomerInfo::default();
        assert!(viewer.scroll_customer(1, &mut info));
        assert!(info.has_consented());
    }

    #[test]
    fn test_real_terms_wrap() {
        let mut viewer = TermsViewer::new(TERMS_TEXT, 5);
        viewer.set_viewport(60, 8);
        assert!(viewer.total_lines() > 40);
        assert!(!viewer.is_at_bottom());
    }
}
