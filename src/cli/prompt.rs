//! Operator interaction: question specifications, the answer bag, and the sessions
//! that ask them.
//!
//! Handlers describe what they want to ask as a list of [`Question`]s and get back
//! [`Answers`] keyed by question name. [`TerminalSession`] asks through `dialoguer`;
//! tests swap in a scripted session.

use crate::error::{AppError, Result};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::collections::HashMap;
use tracing::debug;

/// One selectable entry of a choice list. `value` is `None` for the synthetic "None" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: Option<i32>,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: Option<i32>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The expected shape of an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text.
    Input,
    /// Exactly one entry of the list.
    Select(Vec<Choice>),
}

/// A named question shown to the operator with `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: &'static str,
    pub message: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn input(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            message: message.into(),
            kind: QuestionKind::Input,
        }
    }

    pub fn select(name: &'static str, message: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            name,
            message: message.into(),
            kind: QuestionKind::Select(choices),
        }
    }

    /// The choice list, if this is a selection.
    #[cfg(test)]
    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.kind {
            QuestionKind::Select(choices) => Some(choices),
            QuestionKind::Input => None,
        }
    }
}

/// A typed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Choice(Option<i32>),
}

/// Answers keyed by question name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(HashMap<&'static str, Answer>);

impl Answers {
    pub fn insert(&mut self, name: &'static str, answer: Answer) {
        self.0.insert(name, answer);
    }

    /// The free-text answer to `name`.
    pub fn text(&self, name: &str) -> Result<String> {
        match self.0.get(name) {
            Some(Answer::Text(s)) => Ok(s.clone()),
            _ => Err(AppError::MissingAnswer(format!("expected text for {name:?}"))),
        }
    }

    /// The selected value for `name`; `Ok(None)` when the "None" entry was picked.
    pub fn choice(&self, name: &str) -> Result<Option<i32>> {
        match self.0.get(name) {
            Some(Answer::Choice(v)) => Ok(*v),
            _ => Err(AppError::MissingAnswer(format!("expected a choice for {name:?}"))),
        }
    }

    /// Like [`Answers::choice`], but the "None" entry is not an acceptable pick.
    pub fn required_choice(&self, name: &str) -> Result<i32> {
        self.choice(name)?
            .ok_or_else(|| AppError::MissingAnswer(format!("{name:?} needs a value")))
    }
}

/// Something that can put questions to the operator.
///
/// Questions are asked in order. An aborted session yields `AppError::Cancelled`.
pub trait PromptSession {
    fn ask(&mut self, questions: &[Question]) -> Result<Answers>;
}

/// Asks questions on the terminal with `dialoguer`'s colorful theme.
pub struct TerminalSession {
    theme: ColorfulTheme,
}

impl TerminalSession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl PromptSession for TerminalSession {
    fn ask(&mut self, questions: &[Question]) -> Result<Answers> {
        let mut answers = Answers::default();
        for q in questions {
            let answer = match &q.kind {
                QuestionKind::Input => Answer::Text(
                    Input::<String>::with_theme(&self.theme)
                        .with_prompt(&q.message)
                        .allow_empty(true)
                        .interact_text()?,
                ),
                QuestionKind::Select(choices) => {
                    if choices.is_empty() {
                        // dialoguer refuses to render an empty list
                        return Err(AppError::MissingAnswer(format!(
                            "nothing to choose from for {:?}",
                            q.name
                        )));
                    }
                    let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
                    let index = Select::with_theme(&self.theme)
                        .with_prompt(&q.message)
                        .items(&labels)
                        .default(0)
                        .interact_opt()? // Esc or q cancels
                        .ok_or(AppError::Cancelled)?;
                    Answer::Choice(choices[index].value)
                },
            };
            debug!("Answered {}", q.name);
            answers.insert(q.name, answer);
        }
        Ok(answers)
    }
}
