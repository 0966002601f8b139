pub mod attempt;
pub mod catalog;
pub mod language;
pub mod loaders;
pub mod outcome;
pub mod question;
pub mod verdict;

pub use attempt::{AttemptScript, CodingScript, McqSubmission, QuizAttempt, Submission};
pub use catalog::{QuestionCatalog, QuestionSet};
pub use language::Language;
pub use loaders::{load_all_attempt_scripts, load_attempt_script, load_catalog};
pub use outcome::QuizOutcome;
pub use question::{CodingQuestion, McqOption, McqQuestion, Question, QuestionKind};
pub use verdict::{TestCase, TestVerdict, ValidationReport};
