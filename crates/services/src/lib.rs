#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use exam_core::Clock;

pub use error::{ExamServiceError, SessionError, SessionErrorKind};

pub use sessions::{
    DashboardView, ExamLoopService, ExamProgress, Feedback, FinalReport, NavigationView,
    NavigatorPill, OptionView, QuestionView, RevealMark, ReviewItem, SessionEngine, navigator,
};
