use exam_core::model::{ExamKey, QuestionDraft, QuestionSetDraft};
use storage::StorageError;
use storage::repository::QuestionSetRepository;
use storage::sqlite::SqliteRepository;

fn build_set(title: &str, questions: usize) -> exam_core::model::QuestionSet {
    let items = (0..questions)
        .map(|i| {
            let draft = QuestionDraft::new(format!("Q{i}"), ["a", "b", "c"], i % 3);
            if i % 2 == 0 {
                draft.with_explanation(format!("because {i}"))
            } else {
                draft
            }
        })
        .collect();
    QuestionSetDraft::new(title, items).validate().unwrap()
}

async fn connect(name: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_order_and_explanations() {
    let repo = connect("memdb_roundtrip").await;
    let key = ExamKey::parse("1").unwrap();
    let set = build_set("Tema 1", 4);

    repo.upsert_question_set(&key, &set).await.unwrap();

    let fetched = repo.get_question_set(&key).await.unwrap();
    assert_eq!(fetched.title, "Tema 1");
    assert_eq!(fetched.items.len(), 4);
    assert_eq!(fetched.items[2].text, "Q2");
    assert_eq!(fetched.items[2].correct_option, 2);
    assert_eq!(fetched.items[0].explanation.as_deref(), Some("because 0"));
    assert_eq!(fetched.items[1].explanation, None);

    let validated = fetched.validate().unwrap();
    assert_eq!(validated, set);
}

#[tokio::test]
async fn sqlite_upsert_replaces_previous_questions() {
    let repo = connect("memdb_replace").await;
    let key = ExamKey::parse("2").unwrap();

    repo.upsert_question_set(&key, &build_set("Long", 5))
        .await
        .unwrap();
    repo.upsert_question_set(&key, &build_set("Short", 2))
        .await
        .unwrap();

    let fetched = repo.get_question_set(&key).await.unwrap();
    assert_eq!(fetched.title, "Short");
    assert_eq!(fetched.items.len(), 2);
}

#[tokio::test]
async fn sqlite_missing_exam_is_not_found_and_keys_are_listed() {
    let repo = connect("memdb_missing").await;
    let missing = ExamKey::parse("9").unwrap();
    let err = repo.get_question_set(&missing).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));

    repo.upsert_question_set(&ExamKey::parse("3").unwrap(), &build_set("C", 1))
        .await
        .unwrap();
    repo.upsert_question_set(&ExamKey::parse("final").unwrap(), &build_set("F", 1))
        .await
        .unwrap();

    let keys: Vec<String> = repo
        .list_exam_keys()
        .await
        .unwrap()
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(keys, vec!["03".to_owned(), "final".to_owned()]);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    assert!(repo.list_exam_keys().await.unwrap().is_empty());
}
