mod engine;
mod progress;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::SessionEngine;
pub use progress::ExamProgress;
pub use view::{
    DashboardView, Feedback, FinalReport, NavigationView, NavigatorPill, OptionView,
    QuestionView, RevealMark, ReviewItem, navigator,
};
pub use workflow::ExamLoopService;
