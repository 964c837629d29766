//! Line-based interactive prompts.

use crate::error::{Result, RulesetError};
use std::io::{BufRead, Write};

/// Asks questions on `output` and reads one trimmed line per answer from `input`.
pub struct Prompter<R, W> {
	input: R,
	output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
	pub fn new(input: R, output: W) -> Self {
		Prompter { input, output }
	}

	/// Print `question` and read one line. Returns `None` at end of input.
	pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
		let io_err = |source| RulesetError::PromptFailed {
			prompt: question.to_string(),
			source,
		};

		write!(self.output, "{question}").map_err(io_err)?;
		self.output.flush().map_err(io_err)?;

		let mut line = String::new();
		let read = self.input.read_line(&mut line).map_err(io_err)?;
		if read == 0 {
			return Ok(None);
		}
		Ok(Some(line.trim().to_string()))
	}

	/// Yes/no question: an empty answer, `Y` or `y` means yes. End of input means no.
	pub fn confirm(&mut self, question: &str) -> Result<bool> {
		Ok(match self.ask(question)? {
			Some(answer) => answer.is_empty() || answer.eq_ignore_ascii_case("y"),
			None => false,
		})
	}

	/// Question that may be skipped with an empty answer.
	pub fn optional(&mut self, question: &str) -> Result<Option<String>> {
		Ok(self.ask(question)?.filter(|answer| !answer.is_empty()))
	}

	/// Question that needs a non-empty answer; `what` names it in errors.
	pub fn required(&mut self, question: &str, what: &str) -> Result<String> {
		match self.ask(question)? {
			Some(answer) if !answer.is_empty() => Ok(answer),
			Some(_) => Err(RulesetError::EmptyLabel {
				what: what.to_string(),
			}),
			None => Err(RulesetError::PromptEof {
				prompt: question.to_string(),
			}),
		}
	}

	/// Question whose answer may be empty but must be present.
	pub fn answer(&mut self, question: &str) -> Result<String> {
		self.ask(question)?.ok_or_else(|| RulesetError::PromptEof {
			prompt: question.to_string(),
		})
	}
}
