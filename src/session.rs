//! Session state machine: mode selection, rounds, scoring and the outcome log.

use rand::Rng;
use std::collections::HashSet;
use std::fmt;

use crate::bank::QuestionBank;
use crate::config::{ConfigError, QuizConfig};
use crate::element::Element;
use crate::quiz::{Direction, QuizMode};
use crate::round::{Round, start_round};

/// Free-text identity fields shown by the front-ends. Stored, never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Learner {
    pub name: String,
    pub class: String,
    pub seat: String,
}

/// Result of a submitted answer, kept until the learner moves on.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Feedback {
    pub correct: bool,
    pub direction: Direction,
    /// The record that was asked, for the companion fields.
    pub element: Element,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.correct {
            return f.write_str("Correct!");
        }

        let element = &self.element;
        match self.direction {
            Direction::NameToEnglish | Direction::SymbolToEnglish => write!(
                f,
                "Incorrect. Correct English: {} (Symbol: {}, Name: {})",
                element.english(),
                element.symbol(),
                element.name()
            ),
            Direction::EnglishToSymbol => write!(
                f,
                "Incorrect. Correct symbol: {} ({} / {})",
                element.symbol(),
                element.english(),
                element.name()
            ),
        }
    }
}

/// One answered question. The log only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Outcome {
    pub round: u32,
    pub prompt: String,
    pub chosen: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub options: [String; 2],
    pub direction: Direction,
}

impl Outcome {
    /// Offered options resolved to `English (Symbol / Name)` where possible.
    pub fn review(&self, bank: &QuestionBank) -> Vec<String> {
        self.options
            .iter()
            .map(|option| bank.describe_option(option))
            .collect()
    }
}

/// What the presentation layer needs to render the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based number within the round.
    pub number: usize,
    pub direction: Direction,
    pub prompt: String,
    pub text: String,
    pub options: [String; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub round: u32,
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub percent: usize,
}

impl Progress {
    fn new(round: u32, position: usize, total: usize) -> Self {
        let percent = if total == 0 { 0 } else { position * 100 / total };
        Self {
            round,
            position,
            total,
            percent,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub answered: usize,
    pub correct: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        Self {
            answered: outcomes.len(),
            correct: outcomes.iter().filter(|outcome| outcome.is_correct).count(),
        }
    }

    /// Percentage of correct answers; `0.0` before anything was answered.
    pub fn accuracy(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.correct as f64 / self.answered as f64 * 100.0
        }
    }

    pub fn accuracy_label(&self) -> String {
        format!("{:.1}%", self.accuracy())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total answered: {}", self.answered)?;
        writeln!(f, "Total correct: {}", self.correct)?;
        write!(f, "Accuracy: {}", self.accuracy_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    SelectingMode,
    InRound(Round),
    Finished,
}

/// What a successful transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Started,
    Answered { correct: bool },
    NextQuestion,
    NextRound { ordinal: u32 },
    Finished,
}

/// Rejected transitions. The session is left untouched when one is returned.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("please select an option before submitting")]
    MissingSelection,
    #[error("the current question was already answered")]
    AlreadySubmitted,
    #[error("submit an answer before moving to the next question")]
    NotSubmitted,
    #[error("no round is in progress")]
    NotInRound,
    #[error("the game is still in progress")]
    NotFinished,
    #[error("a mode is already locked in; change mode to pick another")]
    ModeLocked,
    #[error("the question bank is empty")]
    EmptyBank,
    #[error("question {0} is not in the bank")]
    QuestionOutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    config: QuizConfig,
    mode: Option<QuizMode>,
    phase: Phase,
    seen: HashSet<String>,
    log: Vec<Outcome>,
    learner: Learner,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_config(QuizConfig::default())
    }
}

impl Session {
    /// Rejects configs that could never produce a playable round.
    pub fn new(config: QuizConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: QuizConfig) -> Self {
        Self {
            config,
            mode: None,
            phase: Phase::SelectingMode,
            seen: HashSet::new(),
            log: Vec::new(),
            learner: Learner::default(),
        }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn mode(&self) -> Option<QuizMode> {
        self.mode
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.phase {
            Phase::InRound(round) => Some(round),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.log
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.log.last()
    }

    /// Keys of records already asked since the last reset.
    pub fn seen(&self) -> &HashSet<String> {
        &self.seen
    }

    pub fn learner(&self) -> &Learner {
        &self.learner
    }

    pub fn learner_mut(&mut self) -> &mut Learner {
        &mut self.learner
    }

    /// Locks in `mode` and draws round 1.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        mode: QuizMode,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<Step, SessionError> {
        if !matches!(self.phase, Phase::SelectingMode) {
            return Err(SessionError::ModeLocked);
        }
        if bank.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        log::info!("starting session in {}", mode);
        self.mode = Some(mode);
        self.begin(mode, bank, rng);
        Ok(Step::Started)
    }

    /// Same mode, fresh game. Only valid once the previous game ended.
    pub fn play_again<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<Step, SessionError> {
        if !self.is_finished() {
            return Err(SessionError::NotFinished);
        }
        let mode = self.mode.ok_or(SessionError::NotInRound)?;
        if bank.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        log::info!("replaying in {}", mode);
        self.begin(mode, bank, rng);
        Ok(Step::Started)
    }

    /// Unlocks the mode and discards all game progress. Learner fields survive.
    pub fn change_mode(&mut self) {
        log::info!("returning to mode selection");
        self.mode = None;
        self.phase = Phase::SelectingMode;
        self.seen.clear();
        self.log.clear();
    }

    fn begin<R: Rng + ?Sized>(&mut self, mode: QuizMode, bank: &QuestionBank, rng: &mut R) {
        self.seen.clear();
        self.log.clear();
        let round = start_round(
            rng,
            bank,
            &mut self.seen,
            mode,
            1,
            self.config.questions_per_round,
        );
        self.phase = Phase::InRound(round);
    }

    /// The question under the cursor, generating its options on first access.
    pub fn current_question<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Option<QuestionView> {
        let placeholder = &self.config.placeholder_distractor;
        let Phase::InRound(round) = &mut self.phase else {
            return None;
        };

        let key = round.current()?;
        let number = round.position() + 1;
        let element = bank.get(key.question)?;
        let options = round.current_options(rng, bank, placeholder)?.options.clone();

        Some(QuestionView {
            number,
            direction: key.direction,
            prompt: key.direction.prompt(element).to_string(),
            text: key.direction.question_text(element),
            options,
        })
    }

    pub fn progress(&self) -> Option<Progress> {
        let round = self.round()?;
        Some(Progress::new(
            round.ordinal(),
            (round.position() + 1).min(round.len()),
            round.len(),
        ))
    }

    pub fn summary(&self) -> Summary {
        Summary::from_outcomes(&self.log)
    }

    /// Grades `selection` against the current question without moving the cursor.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
        selection: Option<&str>,
    ) -> Result<Step, SessionError> {
        let placeholder = &self.config.placeholder_distractor;
        let Phase::InRound(round) = &mut self.phase else {
            return Err(SessionError::NotInRound);
        };
        if round.is_submitted() {
            return Err(SessionError::AlreadySubmitted);
        }

        let Some(chosen) = selection.map(str::trim).filter(|value| !value.is_empty()) else {
            log::debug!("submit rejected: nothing selected");
            return Err(SessionError::MissingSelection);
        };

        let key = round.current().ok_or(SessionError::NotInRound)?;
        let element = bank
            .get(key.question)
            .ok_or(SessionError::QuestionOutOfRange(key.question))?;
        let options = round
            .current_options(rng, bank, placeholder)
            .cloned()
            .ok_or(SessionError::QuestionOutOfRange(key.question))?;

        let is_correct = chosen.to_lowercase() == options.correct_answer.to_lowercase();

        self.log.push(Outcome {
            round: round.ordinal(),
            prompt: key.direction.prompt(element).to_string(),
            chosen: chosen.to_string(),
            correct_answer: options.correct_answer.clone(),
            is_correct,
            options: options.options,
            direction: key.direction,
        });

        round.record_answer(Feedback {
            correct: is_correct,
            direction: key.direction,
            element: element.clone(),
        });

        log::debug!(
            "round {} question {}: {} ({})",
            round.ordinal(),
            round.position() + 1,
            if is_correct { "correct" } else { "incorrect" },
            key.direction.label()
        );

        Ok(Step::Answered {
            correct: is_correct,
        })
    }

    /// Moves past an answered question, deciding round progression at the end.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<Step, SessionError> {
        let mode = self.mode.ok_or(SessionError::NotInRound)?;
        let Phase::InRound(round) = &mut self.phase else {
            return Err(SessionError::NotInRound);
        };
        if !round.is_submitted() {
            return Err(SessionError::NotSubmitted);
        }

        if let Some(element) = round.current().and_then(|key| bank.get(key.question)) {
            self.seen.insert(element.key().to_string());
        }

        round.advance();
        if !round.is_complete() {
            return Ok(Step::NextQuestion);
        }

        let ordinal = round.ordinal();
        let perfect = round.is_perfect();
        log::info!(
            "round {} finished: {}/{}",
            ordinal,
            round.score(),
            round.len()
        );

        if perfect && ordinal < self.config.max_rounds {
            let next = start_round(
                rng,
                bank,
                &mut self.seen,
                mode,
                ordinal + 1,
                self.config.questions_per_round,
            );
            self.phase = Phase::InRound(next);
            Ok(Step::NextRound {
                ordinal: ordinal + 1,
            })
        } else {
            self.phase = Phase::Finished;
            Ok(Step::Finished)
        }
    }

    /// The front-ends' single button: submit when unanswered, advance otherwise.
    pub fn primary_action<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
        selection: Option<&str>,
    ) -> Result<Step, SessionError> {
        match self.round().map(Round::is_submitted) {
            Some(true) => self.advance(bank, rng),
            Some(false) => self.submit(bank, rng, selection),
            None => Err(SessionError::NotInRound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn two_elements() -> QuestionBank {
        QuestionBank::new(vec![
            Element::new("氫", "Hydrogen", "H").expect("valid"),
            Element::new("氦", "Helium", "He").expect("valid"),
        ])
    }

    fn small_config(questions_per_round: usize) -> QuizConfig {
        QuizConfig {
            questions_per_round,
            ..QuizConfig::default()
        }
    }

    fn correct_answer(session: &Session, bank: &QuestionBank) -> String {
        let key = session
            .round()
            .and_then(Round::current)
            .expect("a question is active");
        let element = bank.get(key.question).expect("question in bank");
        key.direction.answer(element).to_string()
    }

    fn wrong_answer(session: &mut Session, bank: &QuestionBank, rng: &mut StdRng) -> String {
        let correct = correct_answer(session, bank);
        let view = session
            .current_question(bank, rng)
            .expect("a question is active");
        view.options
            .into_iter()
            .find(|option| *option != correct)
            .expect("distractor present")
    }

    #[test]
    fn zero_length_rounds_are_rejected_up_front() {
        let error = Session::new(small_config(0)).expect_err("empty rounds would stall the game");
        assert!(matches!(error, ConfigError::EmptyRound));

        let error = Session::new(QuizConfig {
            max_rounds: 0,
            ..QuizConfig::default()
        })
        .expect_err("zero rounds cannot be played");
        assert!(matches!(error, ConfigError::NoRounds));
    }

    #[test]
    fn learner_edits_mid_round_keep_the_round_intact() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");
        let before = session.current_question(&bank, &mut rng);

        session.learner_mut().name = "Mei".to_string();
        session.learner_mut().seat = "12".to_string();

        assert_eq!(session.learner().name, "Mei");
        assert_eq!(session.learner().seat, "12");
        assert_eq!(session.current_question(&bank, &mut rng), before);
        assert_eq!(session.progress().map(|progress| progress.position), Some(1));
    }

    #[test]
    fn starts_in_mode_selection() {
        let session = Session::default();

        assert_eq!(session.phase(), &Phase::SelectingMode);
        assert!(session.mode().is_none());
        assert!(session.progress().is_none());
    }

    #[test]
    fn hydrogen_helium_scenario() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(42);
        let mut session = Session::new(small_config(2)).expect("valid config");

        session
            .start(QuizMode::Fixed(Direction::EnglishToSymbol), &bank, &mut rng)
            .expect("session should start");

        let round = session.round().expect("round in progress");
        let mut questions = round.questions().to_vec();
        questions.sort_unstable();
        assert_eq!(questions, vec![0, 1]);

        let view = session
            .current_question(&bank, &mut rng)
            .expect("question available");
        let mut options = view.options.to_vec();
        options.sort();
        assert_eq!(options, vec!["H".to_string(), "He".to_string()]);

        let is_hydrogen = view.prompt == "Hydrogen";
        let (right, wrong) = if is_hydrogen { ("H", "He") } else { ("He", "H") };

        assert_eq!(
            session.submit(&bank, &mut rng, Some(wrong)),
            Ok(Step::Answered { correct: false })
        );
        let feedback = session
            .round()
            .and_then(Round::feedback)
            .expect("feedback set")
            .to_string();
        assert!(feedback.starts_with("Incorrect"));
        assert!(feedback.contains(&format!("Correct symbol: {}", right)));
        assert_eq!(session.round().map(Round::score), Some(0));

        session.advance(&bank, &mut rng).expect("advance");
        let next_right = correct_answer(&session, &bank);
        assert_eq!(
            session.submit(&bank, &mut rng, Some(next_right.as_str())),
            Ok(Step::Answered { correct: true })
        );
        assert_eq!(session.round().map(Round::score), Some(1));
        assert_eq!(
            session.round().and_then(Round::feedback).map(ToString::to_string),
            Some("Correct!".to_string())
        );
    }

    #[test]
    fn comparison_ignores_case_and_whitespace() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Fixed(Direction::NameToEnglish), &bank, &mut rng)
            .expect("start");

        let answer = correct_answer(&session, &bank).to_uppercase();
        assert_eq!(
            session.submit(&bank, &mut rng, Some(format!("  {}  ", answer).as_str())),
            Ok(Step::Answered { correct: true })
        );
        assert_eq!(
            session.last_outcome().map(|outcome| outcome.chosen.clone()),
            Some(answer)
        );
    }

    #[test]
    fn missing_selection_changes_nothing() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");
        session.current_question(&bank, &mut rng);
        let before = session.clone();

        assert_eq!(
            session.submit(&bank, &mut rng, None),
            Err(SessionError::MissingSelection)
        );
        assert_eq!(
            session.submit(&bank, &mut rng, Some("   ")),
            Err(SessionError::MissingSelection)
        );
        assert_eq!(session, before);
    }

    #[test]
    fn advance_before_submit_is_rejected() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");
        let before = session.clone();

        assert_eq!(
            session.advance(&bank, &mut rng),
            Err(SessionError::NotSubmitted)
        );
        assert_eq!(session, before);
    }

    #[test]
    fn double_submit_is_rejected() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");

        let answer = correct_answer(&session, &bank);
        session
            .submit(&bank, &mut rng, Some(answer.as_str()))
            .expect("first submit");
        assert_eq!(
            session.submit(&bank, &mut rng, Some(answer.as_str())),
            Err(SessionError::AlreadySubmitted)
        );
        assert_eq!(session.outcomes().len(), 1);
        assert_eq!(session.round().map(Round::score), Some(1));
    }

    #[test]
    fn advance_marks_question_seen() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");

        let key = session.round().and_then(Round::current).expect("question");
        let english = bank.get(key.question).expect("in bank").english().to_string();
        let answer = correct_answer(&session, &bank);
        session.submit(&bank, &mut rng, Some(answer.as_str())).expect("submit");

        assert!(session.seen().is_empty());
        assert_eq!(session.advance(&bank, &mut rng), Ok(Step::NextQuestion));
        assert!(session.seen().contains(&english));

        let round = session.round().expect("round continues");
        assert_eq!(round.position(), 1);
        assert!(!round.is_submitted());
        assert!(round.feedback().is_none());
    }

    #[test]
    fn perfect_rounds_progress_until_cap() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");

        let mut steps = Vec::new();
        while !session.is_finished() {
            let answer = correct_answer(&session, &bank);
            session.submit(&bank, &mut rng, Some(answer.as_str())).expect("submit");
            steps.push(session.advance(&bank, &mut rng).expect("advance"));
        }

        assert_eq!(
            steps,
            vec![
                Step::NextQuestion,
                Step::NextRound { ordinal: 2 },
                Step::NextQuestion,
                Step::NextRound { ordinal: 3 },
                Step::NextQuestion,
                Step::Finished,
            ]
        );
        assert_eq!(session.summary(), Summary { answered: 6, correct: 6 });
        assert_eq!(
            session
                .outcomes()
                .iter()
                .map(|outcome| outcome.round)
                .collect::<Vec<_>>(),
            vec![1, 1, 2, 2, 3, 3]
        );
    }

    #[test]
    fn imperfect_round_finishes_game() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Fixed(Direction::SymbolToEnglish), &bank, &mut rng)
            .expect("start");

        let wrong = wrong_answer(&mut session, &bank, &mut rng);
        session.submit(&bank, &mut rng, Some(wrong.as_str())).expect("submit");
        session.advance(&bank, &mut rng).expect("advance");

        let right = correct_answer(&session, &bank);
        session.submit(&bank, &mut rng, Some(right.as_str())).expect("submit");
        assert_eq!(session.advance(&bank, &mut rng), Ok(Step::Finished));

        assert!(session.is_finished());
        assert!(session.round().is_none());
        assert_eq!(
            session.primary_action(&bank, &mut rng, Some("x")),
            Err(SessionError::NotInRound)
        );
    }

    #[test]
    fn single_round_cap_finishes_after_perfect_round() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(8);
        let mut session = Session::new(QuizConfig {
            questions_per_round: 1,
            max_rounds: 1,
            ..QuizConfig::default()
        })
        .expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");

        let answer = correct_answer(&session, &bank);
        session.submit(&bank, &mut rng, Some(answer.as_str())).expect("submit");
        assert_eq!(session.advance(&bank, &mut rng), Ok(Step::Finished));
    }

    #[test]
    fn primary_action_toggles_between_submit_and_advance() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");

        let answer = correct_answer(&session, &bank);
        assert_eq!(
            session.primary_action(&bank, &mut rng, Some(answer.as_str())),
            Ok(Step::Answered { correct: true })
        );
        assert_eq!(
            session.primary_action(&bank, &mut rng, None),
            Ok(Step::NextQuestion)
        );
        assert_eq!(
            session.primary_action(&bank, &mut rng, None),
            Err(SessionError::MissingSelection)
        );
    }

    #[test]
    fn options_stay_stable_across_reads() {
        let bank = QuestionBank::new(vec![
            Element::new("氫", "Hydrogen", "H").expect("valid"),
            Element::new("氦", "Helium", "He").expect("valid"),
            Element::new("鋰", "Lithium", "Li").expect("valid"),
            Element::new("鈹", "Beryllium", "Be").expect("valid"),
            Element::new("硼", "Boron", "B").expect("valid"),
        ]);
        let mut rng = StdRng::seed_from_u64(10);
        let mut session = Session::new(small_config(3)).expect("valid config");
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");

        let first = session.current_question(&bank, &mut rng).expect("question");
        for _ in 0..5 {
            assert_eq!(session.current_question(&bank, &mut rng), Some(first.clone()));
        }

        session
            .submit(&bank, &mut rng, Some(first.options[0].as_str()))
            .expect("submit");
        assert_eq!(
            session.last_outcome().map(|outcome| outcome.options.clone()),
            Some(first.options.clone())
        );
    }

    #[test]
    fn progress_reports_position_and_percent() {
        let bank = QuestionBank::new(
            (0..12)
                .map(|index| {
                    Element::new(format!("n{}", index), format!("e{}", index), format!("s{}", index))
                        .expect("valid")
                })
                .collect(),
        );
        let mut rng = StdRng::seed_from_u64(11);
        let mut session = Session::default();
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");

        assert_eq!(
            session.progress(),
            Some(Progress {
                round: 1,
                position: 1,
                total: 10,
                percent: 10
            })
        );

        for _ in 0..2 {
            let answer = correct_answer(&session, &bank);
            session.submit(&bank, &mut rng, Some(answer.as_str())).expect("submit");
            session.advance(&bank, &mut rng).expect("advance");
        }

        assert_eq!(
            session.progress(),
            Some(Progress {
                round: 1,
                position: 3,
                total: 10,
                percent: 30
            })
        );
    }

    #[test]
    fn play_again_keeps_mode_and_resets_game() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(12);
        let mut session = Session::new(small_config(2)).expect("valid config");
        let mode = QuizMode::Fixed(Direction::NameToEnglish);
        session.start(mode, &bank, &mut rng).expect("start");

        assert_eq!(
            session.play_again(&bank, &mut rng),
            Err(SessionError::NotFinished)
        );

        let wrong = wrong_answer(&mut session, &bank, &mut rng);
        session.submit(&bank, &mut rng, Some(wrong.as_str())).expect("submit");
        session.advance(&bank, &mut rng).expect("advance");
        let wrong = wrong_answer(&mut session, &bank, &mut rng);
        session.submit(&bank, &mut rng, Some(wrong.as_str())).expect("submit");
        session.advance(&bank, &mut rng).expect("advance");
        assert!(session.is_finished());

        assert_eq!(session.play_again(&bank, &mut rng), Ok(Step::Started));
        assert_eq!(session.mode(), Some(mode));
        assert!(session.outcomes().is_empty());
        assert!(session.seen().is_empty());
        assert_eq!(session.round().map(Round::ordinal), Some(1));
    }

    #[test]
    fn change_mode_resets_everything_but_learner() {
        let bank = two_elements();
        let mut rng = StdRng::seed_from_u64(13);
        let mut session = Session::new(small_config(2)).expect("valid config");
        session.learner_mut().name = "Mei".to_string();
        session.learner_mut().seat = "12".to_string();
        session
            .start(QuizMode::Mixed, &bank, &mut rng)
            .expect("start");

        assert_eq!(
            session.start(QuizMode::Mixed, &bank, &mut rng),
            Err(SessionError::ModeLocked)
        );

        let answer = correct_answer(&session, &bank);
        session.submit(&bank, &mut rng, Some(answer.as_str())).expect("submit");
        session.change_mode();

        assert_eq!(session.phase(), &Phase::SelectingMode);
        assert!(session.mode().is_none());
        assert!(session.outcomes().is_empty());
        assert_eq!(session.learner().name, "Mei");
        assert_eq!(session.learner().seat, "12");

        session
            .start(QuizMode::Fixed(Direction::EnglishToSymbol), &bank, &mut rng)
            .expect("restart with another mode");
    }

    #[test]
    fn empty_bank_cannot_start() {
        let bank = QuestionBank::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(14);
        let mut session = Session::default();

        assert_eq!(
            session.start(QuizMode::Mixed, &bank, &mut rng),
            Err(SessionError::EmptyBank)
        );
        assert_eq!(session.phase(), &Phase::SelectingMode);
    }

    #[test]
    fn summary_rounds_accuracy_to_one_decimal() {
        let summary = Summary {
            answered: 7,
            correct: 5,
        };

        assert_eq!(summary.accuracy_label(), "71.4%");
        assert_eq!(
            summary.to_string(),
            "Total answered: 7\nTotal correct: 5\nAccuracy: 71.4%"
        );
        assert_eq!(Summary::default().accuracy_label(), "0.0%");
    }

    #[test]
    fn feedback_lists_companion_fields() {
        let element = Element::new("氦", "Helium", "He").expect("valid");

        let name_to_english = Feedback {
            correct: false,
            direction: Direction::NameToEnglish,
            element: element.clone(),
        };
        assert_eq!(
            name_to_english.to_string(),
            "Incorrect. Correct English: Helium (Symbol: He, Name: 氦)"
        );

        let english_to_symbol = Feedback {
            correct: false,
            direction: Direction::EnglishToSymbol,
            element,
        };
        assert_eq!(
            english_to_symbol.to_string(),
            "Incorrect. Correct symbol: He (Helium / 氦)"
        );
    }

    #[test]
    fn outcome_review_resolves_options() {
        let bank = two_elements();
        let outcome = Outcome {
            round: 1,
            prompt: "氫".to_string(),
            chosen: "Helium".to_string(),
            correct_answer: "Hydrogen".to_string(),
            is_correct: false,
            options: ["Helium".to_string(), "???".to_string()],
            direction: Direction::NameToEnglish,
        };

        assert_eq!(
            outcome.review(&bank),
            vec!["Helium (He / 氦)".to_string(), "???".to_string()]
        );
    }
}
