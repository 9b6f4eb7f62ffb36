//! Interactive prompting as a pluggable capability.
//!
//! Cancellation is a value, not an error: both prompt methods return
//! `Ok(None)` when the operator cancels (EOF on stdin for the console
//! implementation). Callers decide per call site whether to fall back to a
//! default or escalate.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::error::Result;

/// Free-text and numbered-choice prompting
pub trait Prompter: Send + Sync {
    /// Ask a free-text question. Blank answers are returned as-is; the
    /// caller decides what blank means.
    fn prompt_text(&self, message: &str) -> Result<Option<String>>;

    /// Ask a question whose answer must be one of `allowed`. Implementations
    /// re-ask on anything else, but pass blank input through so the caller
    /// can loop on its own terms.
    fn prompt_choice(&self, message: &str, allowed: &[String]) -> Result<Option<String>>;
}

/// Prompter reading from stdin and writing to stdout
pub struct ConsolePrompter;

impl ConsolePrompter {
    fn read_line(&self) -> Result<Option<String>> {
        let mut input = String::new();
        let bytes = io::stdin().read_line(&mut input)?;

        if bytes == 0 {
            // EOF - the operator closed stdin
            return Ok(None);
        }

        Ok(Some(input.trim().to_string()))
    }
}

impl Prompter for ConsolePrompter {
    fn prompt_text(&self, message: &str) -> Result<Option<String>> {
        print!("{}: ", message);
        io::stdout().flush()?;

        self.read_line()
    }

    fn prompt_choice(&self, message: &str, allowed: &[String]) -> Result<Option<String>> {
        loop {
            println!("{}", message);
            print!("> ");
            io::stdout().flush()?;

            let answer = match self.read_line()? {
                Some(answer) => answer,
                None => return Ok(None),
            };

            if answer.is_empty() || allowed.iter().any(|a| a == &answer) {
                return Ok(Some(answer));
            }

            println!("Invalid selection.");
        }
    }
}

/// Prompter replaying a scripted sequence of answers, for tests.
///
/// Each prompt consumes the next scripted answer; `None` entries simulate a
/// cancelled prompt, and an exhausted script cancels every further prompt.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<&'static str>>,
    {
        ScriptedPrompter {
            answers: Mutex::new(
                answers
                    .into_iter()
                    .map(|a| a.map(|s| s.to_string()))
                    .collect(),
            ),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Prompter that cancels everything it is asked
    pub fn cancelling() -> Self {
        Self::new([])
    }

    /// Messages of the prompts issued so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    fn next_answer(&self, message: &str) -> Option<String> {
        self.asked.lock().unwrap().push(message.to_string());
        self.answers.lock().unwrap().pop_front().flatten()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_text(&self, message: &str) -> Result<Option<String>> {
        Ok(self.next_answer(message))
    }

    fn prompt_choice(&self, message: &str, _allowed: &[String]) -> Result<Option<String>> {
        Ok(self.next_answer(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_replays_in_order() {
        let prompter = ScriptedPrompter::new([Some("1"), Some("2.0.0")]);

        assert_eq!(
            prompter.prompt_choice("pick", &["1".to_string()]).unwrap(),
            Some("1".to_string())
        );
        assert_eq!(
            prompter.prompt_text("version?").unwrap(),
            Some("2.0.0".to_string())
        );
        assert_eq!(prompter.asked(), vec!["pick", "version?"]);
    }

    #[test]
    fn test_scripted_prompter_none_is_cancelled() {
        let prompter = ScriptedPrompter::new([None]);
        assert_eq!(prompter.prompt_text("version?").unwrap(), None);
    }

    #[test]
    fn test_scripted_prompter_exhausted_cancels() {
        let prompter = ScriptedPrompter::cancelling();
        assert_eq!(prompter.prompt_text("anything").unwrap(), None);
    }
}
