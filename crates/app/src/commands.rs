use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use exam_core::model::{ExamKey, QuestionSetDraft, SessionSettings};
use services::{
    Clock, DashboardView, ExamLoopService, FinalReport, QuestionView, SessionEngine, navigator,
};
use storage::Storage;

use crate::args::{ExamArg, ImportArgs, TakeArgs};
use crate::input::{self, Input};
use crate::render;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn exam_key(arg: &ExamArg) -> Result<ExamKey, exam_core::Error> {
    Ok(ExamKey::parse(&arg.exam)?)
}

fn loop_service(storage: &Storage) -> ExamLoopService {
    ExamLoopService::new(Clock::system(), Arc::clone(&storage.question_sets))
}

pub async fn list(storage: &Storage) -> CmdResult {
    let keys = loop_service(storage).available_exams().await?;
    let mut out = std::io::stdout().lock();
    if keys.is_empty() {
        writeln!(out, "no exams found")?;
    }
    for key in keys {
        writeln!(out, "{key}")?;
    }
    Ok(())
}

pub async fn validate(storage: &Storage, arg: &ExamArg) -> CmdResult {
    let key = exam_key(arg)?;
    let set = loop_service(storage).check(&key).await?;
    println!("{key}: {:?} with {} questions", set.title(), set.len());
    Ok(())
}

pub async fn import(storage: &Storage, args: &ImportArgs) -> CmdResult {
    let key = exam_key(&args.exam)?;
    let raw = tokio::fs::read_to_string(&args.file).await?;
    let draft: QuestionSetDraft = serde_json::from_str(&raw)?;
    let set = loop_service(storage).import(&key, draft).await?;
    println!("imported {} questions as exam {key}", set.len());
    Ok(())
}

pub async fn take(storage: &Storage, args: &TakeArgs) -> CmdResult {
    let key = exam_key(&args.exam)?;
    let settings = SessionSettings::new()
        .with_lock_answered(args.lock_answers)
        .with_shuffle_questions(args.shuffle);
    let engine = loop_service(storage)
        .with_settings(settings)
        .start_exam(&key)
        .await?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout().lock();
    run_session(engine, stdin, &mut stdout, args.json).await
}

/// Drive one session from line-based input until quit or end of input.
///
/// With `json` the final report is printed as JSON and the loop ends on
/// finish; otherwise review navigation continues after the text report.
pub async fn run_session<R, W>(
    mut engine: SessionEngine,
    reader: R,
    out: &mut W,
    json: bool,
) -> CmdResult
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if !engine.title().is_empty() {
        writeln!(out, "{}", engine.title())?;
    }
    writeln!(out, "{}", render::HELP)?;
    print_screen(&engine, out)?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match input::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Input::Quit => break,
            Input::Reprint => print_screen(&engine, out)?,
            Input::Next => {
                if engine.next() {
                    print_screen(&engine, out)?;
                } else {
                    writeln!(out, "already at the last question")?;
                }
            }
            Input::Previous => {
                if engine.previous() {
                    print_screen(&engine, out)?;
                } else {
                    writeln!(out, "already at the first question")?;
                }
            }
            Input::GoTo(index) => match engine.go_to(index) {
                Ok(()) => print_screen(&engine, out)?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Input::Select(option) => match engine.select_current(option) {
                Ok(_) => print_screen(&engine, out)?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Input::Finish => {
                let was_finished = engine.is_finished();
                engine.finish()?;
                let report = FinalReport::from_engine(&engine)?;
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
                    return Ok(());
                }
                if was_finished {
                    writeln!(out, "already finished")?;
                }
                write!(out, "{}", render::final_report(&report))?;
                print_screen(&engine, out)?;
            }
        }
    }

    if !engine.is_finished() {
        warn!(session = %engine.session_id(), "input ended before the exam was finished");
    }
    Ok(())
}

fn print_screen<W: Write>(engine: &SessionEngine, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", render::question(&QuestionView::current(engine)))?;
    writeln!(out, "{}", render::navigator(&navigator(engine)))?;
    writeln!(out, "{}", render::dashboard(&DashboardView::from_engine(engine)))
}
