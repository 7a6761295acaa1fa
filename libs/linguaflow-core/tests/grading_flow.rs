//! End-to-end flows: compile author input, store the exercise, grade a
//! learner's attempt, and apply a manual review.

use std::collections::BTreeMap;

use linguaflow_core::{
    compile, markup, review_submission, submit_exercise, AnswerSheet, AuthorInput, Exercise,
    ExerciseStore, InMemoryStore, ReviewUpdate, SubmissionStatus, SubmissionStore, SubmitRequest,
};

fn store_with(input: AuthorInput, title: &str) -> (InMemoryStore, String) {
    let store = InMemoryStore::new();
    let exercise = Exercise::new(title, "", compile(input), None);
    let id = exercise.id.clone();
    ExerciseStore::create(&store, exercise).unwrap();
    (store, id)
}

fn attempt(answers: AnswerSheet) -> SubmitRequest {
    SubmitRequest {
        learner_id: "dana".into(),
        learner_name: "Dana".into(),
        answers,
    }
}

#[test]
fn fill_in_blanks_full_pipeline() {
    let (store, exercise_id) = store_with(
        AuthorInput::FillInBlanks {
            text: "The -1- is red, the -2- is blue.".into(),
            answers: "-1: sky::heaven\n-2: sea::ocean".into(),
        },
        "Colors",
    );

    let submission = submit_exercise(
        &store,
        &store,
        &exercise_id,
        attempt(AnswerSheet::FillInBlanks(BTreeMap::from([
            (1, "Sky".to_string()),
            (2, "lake".to_string()),
        ]))),
    )
    .unwrap();

    assert_eq!(submission.score, 50);
    assert_eq!(submission.status, SubmissionStatus::Graded);

    let history = store.list_for_learner("dana").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].exercise_title, "Colors");
}

#[test]
fn embedded_choice_full_pipeline() {
    let (store, exercise_id) = store_with(
        AuthorInput::MultipleChoice {
            text: "I -1-(a:go; b+:went; c:gone) to school yesterday.".into(),
        },
        "Past tense",
    );

    let perfect = submit_exercise(
        &store,
        &store,
        &exercise_id,
        attempt(AnswerSheet::MultipleChoice(BTreeMap::from([(
            1,
            "b".to_string(),
        )]))),
    )
    .unwrap();
    assert_eq!(perfect.score, 100);

    let wrong = submit_exercise(
        &store,
        &store,
        &exercise_id,
        attempt(AnswerSheet::MultipleChoice(BTreeMap::from([(
            1,
            "a".to_string(),
        )]))),
    )
    .unwrap();
    assert_eq!(wrong.score, 0);

    // Both attempts are kept, newest first.
    let all = SubmissionStore::list(&store).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, wrong.id);
}

#[test]
fn table_offsets_agree_between_compile_and_score() {
    let html = "<table><tr><td>tb:cat </td><td>tb:dog </td></tr></table>";
    let (store, exercise_id) = store_with(AuthorInput::Table { html: html.into() }, "Animals");

    // The interaction surface addresses cells by the tokenizer's offsets.
    let slots = markup::table_slots(html);
    assert_eq!(slots.len(), 2);

    let submission = submit_exercise(
        &store,
        &store,
        &exercise_id,
        attempt(AnswerSheet::Table(BTreeMap::from([
            (slots[0].offset, "Cat".to_string()),
            (slots[1].offset, "fish".to_string()),
        ]))),
    )
    .unwrap();
    assert_eq!(submission.score, 50);
}

#[test]
fn free_text_review_round_trip() {
    let (store, exercise_id) = store_with(
        AuthorInput::FreeText {
            prompt: "Describe your favorite meal.".into(),
        },
        "Food essay",
    );

    let submission = submit_exercise(
        &store,
        &store,
        &exercise_id,
        attempt(AnswerSheet::FreeText("Dumplings, because...".into())),
    )
    .unwrap();
    assert_eq!(submission.score, 0);
    assert_eq!(submission.status, SubmissionStatus::Pending);

    let reviewed = review_submission(
        &store,
        &submission.id,
        ReviewUpdate {
            score: 88,
            comment: Some("Vivid description".into()),
        },
    )
    .unwrap();
    assert_eq!(reviewed.score, 88);
    assert_eq!(reviewed.status, SubmissionStatus::Graded);

    let stored = SubmissionStore::get(&store, &submission.id).unwrap().unwrap();
    assert_eq!(stored.reviewer_comment.as_deref(), Some("Vivid description"));
}

#[test]
fn word_bank_pipeline_keeps_marker_ids_aligned() {
    let (store, exercise_id) = store_with(
        AuthorInput::UseFromList {
            list: "1. went; 2. gone; 3. going;".into(),
            text: "I -1- home. She has -2-. We are -3- now.".into(),
        },
        "Go forms",
    );

    let exercise = ExerciseStore::get(&store, &exercise_id).unwrap().unwrap();
    let linguaflow_core::ExerciseBody::UseFromList { text, key, list } = &exercise.body else {
        panic!("wrong variant");
    };
    assert_eq!(list.len(), 3);

    // Markers in the text and keys in the answer map are the same set.
    let mut marker_ids = markup::blank_ids(text);
    marker_ids.sort_unstable();
    let key_ids: Vec<u32> = key.keys().copied().collect();
    assert_eq!(marker_ids, key_ids);

    let submission = submit_exercise(
        &store,
        &store,
        &exercise_id,
        attempt(AnswerSheet::UseFromList(BTreeMap::from([
            (1, "went".to_string()),
            (2, "gone".to_string()),
            (3, "coming".to_string()),
        ]))),
    )
    .unwrap();
    assert_eq!(submission.score, 67);
}

#[test]
fn deleting_an_exercise_clears_its_history() {
    let (store, exercise_id) = store_with(
        AuthorInput::TrueFalse {
            statements: "t:Madrid is in Spain\nf:Paris is in Italy".into(),
        },
        "Geography",
    );

    let submission = submit_exercise(
        &store,
        &store,
        &exercise_id,
        attempt(AnswerSheet::TrueFalse(BTreeMap::from([
            ("tf-0".to_string(), true),
            ("tf-1".to_string(), true),
        ]))),
    )
    .unwrap();
    assert_eq!(submission.score, 50);

    ExerciseStore::delete(&store, &exercise_id).unwrap();
    assert!(SubmissionStore::get(&store, &submission.id).unwrap().is_none());
    assert!(store.list_for_learner("dana").unwrap().is_empty());
}
