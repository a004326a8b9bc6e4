pub mod bank;
pub mod config;
pub mod demo;
pub mod element;
pub mod quiz;
pub mod round;
pub mod session;
pub mod table;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use bank::{BankLoadError, ColumnMapping, QuestionBank};
pub use config::{ConfigError, QuizConfig};
pub use demo::{demo_bank, demo_elements};
pub use element::{Element, ElementError, Field};
pub use quiz::{
    Direction, OptionCache, OptionSet, ParseModeError, QuestionKey, QuizMode, generate_options,
};
pub use round::{Round, start_round};
pub use session::{
    Feedback, Learner, Outcome, Phase, Progress, QuestionView, Session, SessionError, Step,
    Summary,
};
pub use table::{Table, TableError, TableFormat};
