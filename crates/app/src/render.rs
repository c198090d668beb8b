//! Plain-text rendering of the session views.

use exam_core::model::AnswerOutcome;
use services::{DashboardView, Feedback, FinalReport, NavigatorPill, QuestionView, RevealMark};

pub fn question(view: &QuestionView) -> String {
    let mut lines = vec![
        format!("Question {}/{}", view.number, view.total),
        view.text.clone(),
    ];

    for option in &view.options {
        let marker = match (option.reveal, option.selected) {
            (Some(RevealMark::Correct), _) => "+",
            (Some(RevealMark::Wrong), _) => "x",
            (None, true) => ">",
            (None, false) => " ",
        };
        lines.push(format!(" {marker} {}) {}", option.label, option.text));
    }

    if let Some(feedback) = &view.feedback {
        lines.push(feedback_line(feedback));
    } else if view.locked {
        lines.push("(answer locked)".to_owned());
    }
    block(lines)
}

/// Join lines into a newline-terminated block.
fn block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn feedback_line(feedback: &Feedback) -> String {
    match feedback {
        Feedback::Correct { explanation } => {
            with_explanation("Correct.".into(), explanation.as_deref())
        }
        Feedback::Incorrect {
            correct_label,
            explanation,
        } => with_explanation(
            format!("Incorrect. Correct answer: {correct_label}."),
            explanation.as_deref(),
        ),
        Feedback::Skipped { correct_label } => {
            format!("Not answered. Correct answer: {correct_label}.")
        }
    }
}

fn with_explanation(mut line: String, explanation: Option<&str>) -> String {
    if let Some(text) = explanation {
        line.push(' ');
        line.push_str(text);
    }
    line
}

/// One pill per question, e.g. `+1+ [2]*  3 `; `*` marks the current one.
pub fn navigator(pills: &[NavigatorPill]) -> String {
    pills
        .iter()
        .map(|pill| {
            let (open, close) = match pill.outcome {
                Some(AnswerOutcome::Correct) => ('+', '+'),
                Some(AnswerOutcome::Incorrect) => ('x', 'x'),
                Some(AnswerOutcome::Skipped) => ('-', '-'),
                None if pill.status.has_answer() => ('[', ']'),
                None => (' ', ' '),
            };
            let current = if pill.is_current { "*" } else { "" };
            format!("{open}{}{close}{current}", pill.number)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn dashboard(view: &DashboardView) -> String {
    match (view.results, view.percent) {
        (Some(results), Some(percent)) => format!(
            "Correct {} | Incorrect {} | Skipped {} | {percent}%",
            results.correct(),
            results.incorrect(),
            results.skipped(),
        ),
        _ => format!("Answered {}/{}", view.answered, view.total),
    }
}

pub fn final_report(report: &FinalReport) -> String {
    let mut lines = Vec::new();
    if !report.title.is_empty() {
        lines.push(report.title.clone());
    }
    lines.push(format!("Score: {:.1} / 10", report.score));
    lines.push(format!(
        "Correct {} | Incorrect {} | Skipped {}",
        report.grade.correct, report.grade.incorrect, report.grade.skipped
    ));
    if let Some(secs) = report.elapsed_secs {
        lines.push(format!("Time: {}m {:02}s", secs / 60, secs % 60));
    }
    if report.passed {
        lines.extend(CELEBRATION.lines().map(str::to_owned));
    }

    for item in &report.items {
        let tag = match item.outcome {
            AnswerOutcome::Correct => "ok",
            AnswerOutcome::Incorrect => "ko",
            AnswerOutcome::Skipped => "sk",
        };
        lines.push(format!("{:>3}. [{tag}] {}", item.number, item.text));
        match (&item.chosen, item.outcome) {
            (Some(_), AnswerOutcome::Correct) => {}
            (Some(chosen), _) => {
                lines.push(format!("     your answer: {chosen}"));
                lines.push(format!("     correct:     {}", item.correct));
            }
            (None, _) => lines.push(format!("     correct:     {}", item.correct)),
        }
    }
    block(lines)
}

const CELEBRATION: &str = "\
*****************************
*   Passed. Well done!      *
*****************************
";

pub const HELP: &str = "a-z or 1.. select  :n next  :p previous  :g <n> jump  :f finish  :r reprint  :q quit";

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{QuestionDraft, QuestionSetDraft};
    use exam_core::time::fixed_clock;
    use services::{SessionEngine, navigator as pills};

    fn engine() -> SessionEngine {
        let items = vec![
            QuestionDraft::new("Capital of France?", ["Paris", "Rome"], 0)
                .with_explanation("Paris has been the capital since 987."),
            QuestionDraft::new("2 + 2?", ["3", "4", "5"], 1),
        ];
        SessionEngine::load(QuestionSetDraft::new("Mixed", items))
            .unwrap()
            .with_clock(fixed_clock())
    }

    #[test]
    fn question_marks_selection_before_finish() {
        let mut engine = engine();
        engine.select_option(0, 1).unwrap();
        let text = question(&QuestionView::current(&engine));
        assert!(text.starts_with("Question 1/2\nCapital of France?\n"));
        assert!(text.contains(" > B) Rome"));
        assert!(text.contains("   A) Paris"));
        assert!(!text.contains("Correct"));
    }

    #[test]
    fn question_reveals_after_finish() {
        let mut engine = engine();
        engine.select_option(0, 1).unwrap();
        engine.finish().unwrap();

        let text = question(&QuestionView::current(&engine));
        assert!(text.contains(" + A) Paris"));
        assert!(text.contains(" x B) Rome"));
        assert!(text.contains("Incorrect. Correct answer: A. Paris has been"));

        let skipped = question(&QuestionView::for_index(&engine, 1).unwrap());
        assert!(skipped.contains("Not answered. Correct answer: B."));
    }

    #[test]
    fn navigator_and_dashboard_follow_state() {
        let mut engine = engine();
        engine.select_option(1, 1).unwrap();
        assert_eq!(navigator(&pills(&engine)), " 1 * [2]");
        assert_eq!(dashboard(&DashboardView::from_engine(&engine)), "Answered 1/2");

        engine.finish().unwrap();
        assert_eq!(navigator(&pills(&engine)), "-1-* +2+");
        assert_eq!(
            dashboard(&DashboardView::from_engine(&engine)),
            "Correct 1 | Incorrect 0 | Skipped 1 | 50%"
        );
    }

    #[test]
    fn report_celebrates_passing_scores() {
        let mut engine = engine();
        engine.select_option(0, 0).unwrap();
        engine.select_option(1, 0).unwrap();
        engine.finish().unwrap();

        let text = final_report(&FinalReport::from_engine(&engine).unwrap());
        assert!(text.starts_with("Mixed\nScore: 5.0 / 10\n"));
        assert!(text.contains("Passed. Well done!"));
        assert!(text.contains("  1. [ok] Capital of France?"));
        assert!(text.contains("  2. [ko] 2 + 2?\n     your answer: 3\n     correct:     4"));
        assert!(text.contains("Time: 0m 00s"));
    }
}
