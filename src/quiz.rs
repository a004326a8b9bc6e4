use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::bank::QuestionBank;
use crate::element::{Element, Field};

/// Which field is shown as the prompt and which one is the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Shows the name, expects the English term.
    NameToEnglish,
    /// Shows the English term, expects the symbol.
    EnglishToSymbol,
    /// Shows the symbol, expects the English term.
    SymbolToEnglish,
}

impl Direction {
    pub const ALL: [Direction; 3] = [
        Direction::NameToEnglish,
        Direction::EnglishToSymbol,
        Direction::SymbolToEnglish,
    ];

    pub fn prompt_field(self) -> Field {
        match self {
            Direction::NameToEnglish => Field::Name,
            Direction::EnglishToSymbol => Field::English,
            Direction::SymbolToEnglish => Field::Symbol,
        }
    }

    pub fn answer_field(self) -> Field {
        match self {
            Direction::NameToEnglish | Direction::SymbolToEnglish => Field::English,
            Direction::EnglishToSymbol => Field::Symbol,
        }
    }

    pub fn prompt<'a>(self, element: &'a Element) -> &'a str {
        element.field(self.prompt_field())
    }

    pub fn answer<'a>(self, element: &'a Element) -> &'a str {
        element.field(self.answer_field())
    }

    /// Full question sentence for `element`.
    pub fn question_text(self, element: &Element) -> String {
        let prompt = self.prompt(element);
        match self {
            Direction::NameToEnglish => format!("What is the English term for \"{}\"?", prompt),
            Direction::EnglishToSymbol => format!("Which symbol matches \"{}\"?", prompt),
            Direction::SymbolToEnglish => {
                format!("What is the English name of the symbol \"{}\"?", prompt)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::NameToEnglish => "Name → English",
            Direction::EnglishToSymbol => "English → Symbol",
            Direction::SymbolToEnglish => "Symbol → English",
        }
    }
}

/// Session-wide question mode chosen before the first round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    Fixed(Direction),
    /// Every question draws its own direction.
    Mixed,
}

impl QuizMode {
    pub const ALL: [QuizMode; 4] = [
        QuizMode::Fixed(Direction::NameToEnglish),
        QuizMode::Fixed(Direction::EnglishToSymbol),
        QuizMode::Fixed(Direction::SymbolToEnglish),
        QuizMode::Mixed,
    ];

    /// Direction for the next question: the fixed one, or a uniform pick in mixed mode.
    pub fn pick_direction<R: Rng + ?Sized>(self, rng: &mut R) -> Direction {
        match self {
            QuizMode::Fixed(direction) => direction,
            QuizMode::Mixed => Direction::ALL[rng.gen_range(0..Direction::ALL.len())],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Fixed(Direction::NameToEnglish) => "Mode 1: Name → English",
            QuizMode::Fixed(Direction::EnglishToSymbol) => "Mode 2: English → Symbol",
            QuizMode::Fixed(Direction::SymbolToEnglish) => "Mode 3: Symbol → English",
            QuizMode::Mixed => "Mode 4: Mixed (1-3)",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown quiz mode: {0} (expected 1-4, name-to-english, english-to-symbol, symbol-to-english or mixed)")]
pub struct ParseModeError(String);

impl FromStr for QuizMode {
    type Err = ParseModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "name-to-english" => Ok(QuizMode::Fixed(Direction::NameToEnglish)),
            "2" | "english-to-symbol" => Ok(QuizMode::Fixed(Direction::EnglishToSymbol)),
            "3" | "symbol-to-english" => Ok(QuizMode::Fixed(Direction::SymbolToEnglish)),
            "4" | "mixed" => Ok(QuizMode::Mixed),
            _ => Err(ParseModeError(value.to_string())),
        }
    }
}

/// The two choices offered for a question.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OptionSet {
    pub correct_answer: String,
    /// Correct answer and distractor in random order.
    pub options: [String; 2],
}

impl OptionSet {
    /// Case-insensitive membership test for a user selection.
    pub fn contains(&self, value: &str) -> bool {
        let needle = value.trim().to_lowercase();
        self.options
            .iter()
            .any(|option| option.to_lowercase() == needle)
    }
}

/// Builds the option pair for `element` asked in `direction`.
///
/// The distractor is drawn uniformly from every bank record whose answer field
/// differs (case-insensitively) from the correct answer; `placeholder` stands in
/// when no such record exists.
pub fn generate_options<R: Rng + ?Sized>(
    rng: &mut R,
    bank: &QuestionBank,
    element: &Element,
    direction: Direction,
    placeholder: &str,
) -> OptionSet {
    let field = direction.answer_field();
    let correct = direction.answer(element).to_string();
    let correct_folded = correct.to_lowercase();

    let pool: Vec<&str> = bank
        .elements()
        .iter()
        .map(|candidate| candidate.field(field))
        .filter(|value| value.to_lowercase() != correct_folded)
        .collect();

    let distractor = match pool.choose(rng) {
        Some(value) => value.to_string(),
        None => {
            log::warn!(
                "no distractor available for {} ({}), using placeholder",
                correct,
                direction.label()
            );
            placeholder.to_string()
        }
    };

    let mut options = [correct.clone(), distractor];
    options.shuffle(rng);

    OptionSet {
        correct_answer: correct,
        options,
    }
}

/// Identity of a generated option set within one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionKey {
    pub question: usize,
    pub direction: Direction,
}

/// Option sets generated during a round, so repeated reads never redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionCache {
    entries: HashMap<QuestionKey, OptionSet>,
}

impl OptionCache {
    /// Returns the cached set for `question`, generating it on first use.
    pub fn get_or_generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bank: &QuestionBank,
        question: usize,
        element: &Element,
        direction: Direction,
        placeholder: &str,
    ) -> &OptionSet {
        self.entries
            .entry(QuestionKey {
                question,
                direction,
            })
            .or_insert_with(|| generate_options(rng, bank, element, direction, placeholder))
    }

    pub fn get(&self, key: &QuestionKey) -> Option<&OptionSet> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
