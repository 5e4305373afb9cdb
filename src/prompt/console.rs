//! Line-oriented console I/O
//!
//! Generic over the reader and writer so the prompt wizard can be driven by
//! a script in tests. Secrets go through `rpassword` when attached to a
//! terminal.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::{OnboardError, OnboardResult};

/// Answer that empties an optional field instead of keeping its default
pub const CLEAR_TOKEN: &str = "-";

/// Reader/writer pair the prompt steps talk through
pub struct Console<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Scripted console; secrets are read as plain lines
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            interactive: false,
        }
    }

    /// Read secrets without echo (stdin must be a terminal)
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Write one line
    pub fn say(&mut self, line: impl Display) -> OnboardResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    pub fn blank(&mut self) -> OnboardResult<()> {
        self.say("")
    }

    /// Section heading underlined to its width
    pub fn heading(&mut self, title: &str) -> OnboardResult<()> {
        self.blank()?;
        self.say(title)?;
        self.say("=".repeat(title.chars().count()))?;
        self.blank()
    }

    /// Ask for a line; an empty answer yields `default`
    pub fn ask(&mut self, prompt: &str, default: &str) -> OnboardResult<String> {
        if default.is_empty() {
            write!(self.output, "{}: ", prompt)?;
        } else {
            write!(self.output, "{} [{}]: ", prompt, default)?;
        }
        self.output.flush()?;

        let answer = self.read_line()?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Ask for an optional value; blank keeps `default`, `-` clears it
    pub fn ask_optional(&mut self, prompt: &str, default: &str) -> OnboardResult<String> {
        let prompt = if default.is_empty() {
            prompt.to_string()
        } else {
            format!("{} ('{}' to clear)", prompt, CLEAR_TOKEN)
        };

        let answer = self.ask(&prompt, default)?;
        if answer == CLEAR_TOKEN {
            Ok(String::new())
        } else {
            Ok(answer)
        }
    }

    /// Ask for a secret; an empty answer keeps `existing`
    pub fn ask_secret(&mut self, prompt: &str, existing: &str) -> OnboardResult<String> {
        let suffix = if existing.is_empty() { "" } else { " [keep current]" };
        let prompt = format!("{}{}: ", prompt, suffix);

        let answer = if self.interactive {
            self.output.flush()?;
            rpassword::prompt_password(prompt)?.trim().to_string()
        } else {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
            self.read_line()?
        };

        if answer.is_empty() {
            Ok(existing.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Yes/no question
    pub fn confirm(&mut self, prompt: &str, default: bool) -> OnboardResult<bool> {
        let hint = if default { "yes" } else { "no" };
        loop {
            let answer = self.ask(&format!("{} (yes/no)", prompt), hint)?;
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer yes or no.")?,
            }
        }
    }

    /// Consume the console, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> OnboardResult<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Err(OnboardError::Io("input closed before the wizard finished".into()));
        }
        Ok(line.trim().to_string())
    }
}
