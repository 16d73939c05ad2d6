//! Extraction of a multiple-choice question from a model's free-text reply.
//!
//! The model is asked to answer in this shape, but nothing guarantees it will:
//!
//! ```text
//! Question: <question text>
//! Options:
//! A) <option A>
//! B) <option B>
//! C) <option C>
//! D) <option D>
//! Answer: <letter>
//! Hint: <hint text>
//! ```
//!
//! Fields are located by marker prefix over trimmed lines, never by line
//! position, so blank lines and chatter around the template are ignored.

use crate::error::ParseError;
use serde::Serialize;
use std::str::FromStr;

pub const QUESTION_MARKER: &str = "Question:";
pub const OPTION_MARKERS: [&str; 4] = ["A)", "B)", "C)", "D)"];
pub const ANSWER_MARKER: &str = "Answer:";
pub const HINT_MARKER: &str = "Hint:";

/// A fully-populated quiz question.
///
/// Only `parse` builds one, so every instance has four non-empty options and
/// non-empty question, answer and hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedQuestion {
    question: String,
    options: [String; 4],
    #[serde(rename = "ans")]
    answer: String,
    hint: String,
}

impl GeneratedQuestion {
    /// Parse a raw model reply.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = raw.lines().map(str::trim).collect();

        let question = field_after(&lines, QUESTION_MARKER)
            .map(|(_, value)| value)
            .ok_or(ParseError::MissingQuestion)?;

        // B) is only looked for after the line holding A), and so on.
        let mut options: [&str; 4] = [""; 4];
        let mut from = 0;
        for (found, marker) in OPTION_MARKERS.iter().enumerate() {
            let (index, value) = field_after(&lines[from..], marker)
                .ok_or(ParseError::MissingOptions { found })?;
            options[found] = value;
            from += index + 1;
        }

        let answer = field_after(&lines, ANSWER_MARKER)
            .map(|(_, value)| value)
            .ok_or(ParseError::MissingAnswer)?;
        let hint = field_after(&lines, HINT_MARKER)
            .map(|(_, value)| value)
            .ok_or(ParseError::MissingHint)?;

        require("question", question)?;
        for (name, value) in ["option A", "option B", "option C", "option D"]
            .into_iter()
            .zip(options)
        {
            require(name, value)?;
        }
        require("answer", answer)?;
        require("hint", hint)?;

        Ok(Self {
            question: question.to_string(),
            options: options.map(str::to_string),
            answer: answer.to_string(),
            hint: hint.to_string(),
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Options in A–D order
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    /// The correct answer as the model stated it, normally a single letter.
    /// Not checked against the options.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }
}

impl FromStr for GeneratedQuestion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// First line starting with `marker`, as (line index, trimmed remainder).
fn field_after<'a>(lines: &[&'a str], marker: &str) -> Option<(usize, &'a str)> {
    lines.iter().enumerate().find_map(|(index, line)| {
        line.strip_prefix(marker)
            .map(|rest| (index, rest.trim()))
    })
}

fn require(name: &'static str, value: &str) -> Result<(), ParseError> {
    if value.is_empty() {
        Err(ParseError::EmptyField(name))
    } else {
        Ok(())
    }
}
