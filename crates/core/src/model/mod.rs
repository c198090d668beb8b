mod answers;
mod ids;
mod question;
mod question_set;
mod results;
mod settings;
mod status;

pub use ids::{EXAM_KEY_WIDTH, ExamKey, ExamKeyError, SessionId};

pub use answers::AnswerSheet;
pub use question::{
    MIN_OPTIONS, Question, QuestionDraft, QuestionError, option_index_from_label, option_label,
};
pub use question_set::{QuestionSet, QuestionSetDraft, QuestionSetError};
pub use results::{
    AnswerOutcome, GradeSummary, PASSING_SCORE, ResultsError, SessionResults, score_out_of_10,
};
pub use settings::SessionSettings;
pub use status::QuestionStatus;
