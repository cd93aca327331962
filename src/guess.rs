//! Guess session: attempt history, pending input and win/loss detection for
//! one active track.

use serde::Serialize;

use crate::error::{Error, Result};

/// Attempt budget per track.
pub const MAX_ATTEMPTS: usize = 6;

/// One consumed attempt. The label shown for a skip matches the attempt row text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessAttempt {
    Guess(String),
    Skipped,
}

impl GuessAttempt {
    pub fn label(&self) -> &str {
        match self {
            GuessAttempt::Guess(text) => text,
            GuessAttempt::Skipped => "Skipped",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// What a recorded attempt did to the round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessEvent {
    /// Wrong guess, attempts remain.
    Wrong { attempts: usize },
    /// Skip recorded, attempts remain.
    Skipped { attempts: usize },
    Won { answer: String },
    Lost { answer: String },
}

#[derive(Clone, Debug)]
pub struct GuessSession {
    answer: String,
    attempts: Vec<GuessAttempt>,
    input: String,
    max_attempts: usize,
    // set by select_suggestion, cleared on the next edit
    suggestions_suppressed: bool,
}

/// Case-insensitive exact match. Both sides are trimmed first, a deliberate
/// relaxation so a trailing space from typing or autocomplete does not cost
/// an attempt. No other normalization or aliasing is applied.
pub fn is_match(guess: &str, answer: &str) -> bool {
    guess.trim().to_lowercase() == answer.trim().to_lowercase()
}

impl GuessSession {
    pub fn new(answer: impl Into<String>, max_attempts: usize) -> Self {
        Self {
            answer: answer.into(),
            attempts: Vec::with_capacity(max_attempts),
            input: String::new(),
            max_attempts,
            suggestions_suppressed: false,
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn attempts(&self) -> &[GuessAttempt] {
        &self.attempts
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions_suppressed(&self) -> bool {
        self.suggestions_suppressed
    }

    /// Derived from the history on every call; never stored.
    pub fn outcome(&self) -> Outcome {
        let won = self.attempts.iter().any(|a| match a {
            GuessAttempt::Guess(text) => is_match(text, &self.answer),
            GuessAttempt::Skipped => false,
        });
        if won {
            Outcome::Won
        } else if self.attempts.len() >= self.max_attempts {
            Outcome::Lost
        } else {
            Outcome::InProgress
        }
    }

    /// Record a free-text guess. Blank text or a finished round is rejected with
    /// `Error::InvalidInput` and leaves the session untouched.
    pub fn submit_guess(&mut self, text: &str) -> Result<GuessEvent> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("empty guess".into()));
        }
        self.ensure_in_progress()?;

        let correct = is_match(text, &self.answer);
        self.attempts.push(GuessAttempt::Guess(text.to_string()));
        self.input.clear();
        self.suggestions_suppressed = false;

        if correct {
            Ok(GuessEvent::Won {
                answer: self.answer.clone(),
            })
        } else {
            Ok(self.after_miss(|attempts| GuessEvent::Wrong { attempts }))
        }
    }

    /// Submit whatever is in the pending input box.
    pub fn submit_input(&mut self) -> Result<GuessEvent> {
        let text = self.input.clone();
        self.submit_guess(&text)
    }

    /// Consume an attempt without guessing. A skip can never win, but the last
    /// skip loses the round.
    pub fn skip(&mut self) -> Result<GuessEvent> {
        self.ensure_in_progress()?;
        self.attempts.push(GuessAttempt::Skipped);
        Ok(self.after_miss(|attempts| GuessEvent::Skipped { attempts }))
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Replace the pending text (typing). Re-enables the suggestion list.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.suggestions_suppressed = false;
    }

    /// Fill the input from a suggestion and hide the list until the next edit.
    pub fn select_suggestion(&mut self, title: &str) {
        self.input = title.to_string();
        self.suggestions_suppressed = true;
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.outcome() {
            Outcome::InProgress => Ok(()),
            done => Err(Error::InvalidInput(format!("round already {:?}", done))),
        }
    }

    fn after_miss(&self, pending: impl FnOnce(usize) -> GuessEvent) -> GuessEvent {
        if self.attempts.len() >= self.max_attempts {
            GuessEvent::Lost {
                answer: self.answer.clone(),
            }
        } else {
            pending(self.attempts.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_match_ignores_case_and_outer_whitespace() {
        assert!(is_match("  dil chahta HAI ", "Dil Chahta Hai"));
        assert!(!is_match("Dil Chahta", "Dil Chahta Hai"));
        assert!(!is_match("Dil  Chahta Hai", "Dil Chahta Hai"));
    }

    #[test]
    fn test_skip_label() {
        assert_eq!(GuessAttempt::Skipped.label(), "Skipped");
        assert_eq!(GuessAttempt::Guess("Kal Ho Naa Ho".into()).label(), "Kal Ho Naa Ho");
    }

    #[test]
    fn test_blank_guess_keeps_input() {
        let mut s = GuessSession::new("Taal", MAX_ATTEMPTS);
        s.set_input("   ");
        assert!(s.submit_input().is_err());
        assert_eq!(s.input(), "   ");
        assert_eq!(s.attempt_count(), 0);
    }
}
