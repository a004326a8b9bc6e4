use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::bank::QuestionBank;
use crate::quiz::{Direction, OptionCache, OptionSet, QuestionKey, QuizMode};
use crate::session::Feedback;

/// One batch of questions answered before progression is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    ordinal: u32,
    questions: Vec<usize>,
    directions: Vec<Direction>,
    position: usize,
    score: usize,
    submitted: bool,
    feedback: Option<Feedback>,
    options: OptionCache,
}

/// Draws the next round from records whose key is not in `seen`.
///
/// When every record has been seen the set is cleared first, so a round is never
/// empty unless the bank itself is.
pub fn start_round<R: Rng + ?Sized>(
    rng: &mut R,
    bank: &QuestionBank,
    seen: &mut HashSet<String>,
    mode: QuizMode,
    ordinal: u32,
    target_len: usize,
) -> Round {
    let mut pool: Vec<usize> = bank
        .elements()
        .iter()
        .enumerate()
        .filter(|(_, element)| !seen.contains(element.key()))
        .map(|(index, _)| index)
        .collect();

    if pool.is_empty() {
        log::info!("all {} elements seen, resetting seen set", bank.len());
        seen.clear();
        pool = (0..bank.len()).collect();
    }

    let questions = if pool.len() <= target_len {
        pool.shuffle(rng);
        pool
    } else {
        let (picked, _) = pool.partial_shuffle(rng, target_len);
        picked.to_vec()
    };

    let directions = questions
        .iter()
        .map(|_| mode.pick_direction(rng))
        .collect();

    log::debug!(
        "round {} drew {} questions ({})",
        ordinal,
        questions.len(),
        mode
    );

    Round {
        ordinal,
        questions,
        directions,
        position: 0,
        score: 0,
        submitted: false,
        feedback: None,
        options: OptionCache::default(),
    }
}

impl Round {
    /// 1-based round number.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Bank indices in asking order.
    pub fn questions(&self) -> &[usize] {
        &self.questions
    }

    /// Direction per question, aligned with [`Round::questions`].
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 0-based cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.questions.len()
    }

    pub fn is_perfect(&self) -> bool {
        self.score == self.questions.len()
    }

    /// Bank index and direction under the cursor.
    pub fn current(&self) -> Option<QuestionKey> {
        let question = *self.questions.get(self.position)?;
        let direction = *self.directions.get(self.position)?;
        Some(QuestionKey {
            question,
            direction,
        })
    }

    /// Options for the current question, generated once and cached for the round.
    pub fn current_options<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bank: &QuestionBank,
        placeholder: &str,
    ) -> Option<&OptionSet> {
        let key = self.current()?;
        let element = bank.get(key.question)?;
        Some(self.options.get_or_generate(
            rng,
            bank,
            key.question,
            element,
            key.direction,
            placeholder,
        ))
    }

    /// Options already generated for `key`, without drawing new ones.
    pub fn cached_options(&self, key: &QuestionKey) -> Option<&OptionSet> {
        self.options.get(key)
    }

    pub(crate) fn record_answer(&mut self, feedback: Feedback) {
        if feedback.correct && self.score < self.questions.len() {
            self.score += 1;
        }
        self.submitted = true;
        self.feedback = Some(feedback);
    }

    pub(crate) fn advance(&mut self) {
        self.position += 1;
        self.submitted = false;
        self.feedback = None;
    }
}
