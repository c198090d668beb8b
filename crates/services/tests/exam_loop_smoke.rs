use std::sync::Arc;

use exam_core::model::{ExamKey, QuestionDraft, QuestionSetDraft, SessionSettings};
use exam_core::time::fixed_now;
use services::{Clock, DashboardView, ExamLoopService, FinalReport, NavigationView};
use storage::InMemoryRepository;

#[tokio::test]
async fn exam_loop_runs_a_full_session() {
    let repo = InMemoryRepository::new();
    let key = ExamKey::parse("4").unwrap();
    let draft = QuestionSetDraft::new(
        "Smoke Exam",
        (0..3)
            .map(|i| QuestionDraft::new(format!("Q{i}"), ["A", "B", "C"], i))
            .collect(),
    );
    repo.insert_draft(key.clone(), draft).unwrap();

    let clock = Clock::fixed(fixed_now());
    let loop_svc = ExamLoopService::new(clock, Arc::new(repo))
        .with_settings(SessionSettings::new().with_lock_answered(true));
    assert_eq!(loop_svc.available_exams().await.unwrap(), vec![key.clone()]);

    let mut session = loop_svc.start_exam(&key).await.unwrap();
    assert!(session.settings().lock_answered());

    loop {
        let index = session.current_index();
        session.select_current(index % 2).unwrap();
        if !NavigationView::from_engine(&session).can_go_next {
            break;
        }
        assert!(session.next());
    }
    assert!(NavigationView::from_engine(&session).can_finish);
    assert_eq!(DashboardView::from_engine(&session).answered, 3);

    session.finish().unwrap();
    let report = FinalReport::from_engine(&session).unwrap();
    assert_eq!(report.title, "Smoke Exam");
    assert_eq!(report.grade.correct, 2);
    assert_eq!(report.grade.incorrect, 1);
    assert!(report.passed);
    assert_eq!(report.elapsed_secs, Some(0));
    assert_eq!(session.finished_at(), Some(fixed_now()));
}
