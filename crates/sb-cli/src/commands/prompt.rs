//! Line-based operator prompts

use sb_core::{DialectSet, Version};
use sb_runner::{BumpPlan, PromptError, Prompter};
use std::io::{BufRead, Write};

/// Asks for bump inputs one line at a time.
///
/// An empty answer takes the default shown in brackets; an invalid answer
/// is reported and asked again. End of input takes the default, and
/// declines the confirmation.
pub(crate) struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn new_version(&mut self, current: Version, proposed: Version) -> Result<Version, PromptError> {
        let prompt = format!("New version (current {current}) [{proposed}]: ");
        loop {
            match self.ask(&prompt)? {
                None => return Ok(proposed),
                Some(answer) if answer.is_empty() => return Ok(proposed),
                Some(answer) => match Version::parse(&answer) {
                    Ok(version) => return Ok(version),
                    Err(e) => writeln!(self.output, "{e}")?,
                },
            }
        }
    }

    fn dialects(&mut self, available: &DialectSet) -> Result<DialectSet, PromptError> {
        let prompt = format!("Dialects [{available}]: ");
        loop {
            match self.ask(&prompt)? {
                None => return Ok(available.clone()),
                Some(answer) if answer.is_empty() => return Ok(available.clone()),
                Some(answer) => match DialectSet::parse_list(&answer) {
                    Ok(dialects) => return Ok(dialects),
                    Err(e) => writeln!(self.output, "{e}")?,
                },
            }
        }
    }

    fn confirm(&mut self, plan: &BumpPlan) -> Result<bool, PromptError> {
        writeln!(self.output, "{plan}")?;
        let answer = self.ask("Proceed? [y/N]: ")?.unwrap_or_default();
        Ok(matches!(
            answer.to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}
