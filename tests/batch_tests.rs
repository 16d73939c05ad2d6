
use finance_quiz::error::BatchError;
use finance_quiz::generator::build_prompt;
use finance_quiz::CHAPTERS;
use test_utils::{fail, init_tracing, ok, scripted_assembler, unusable};

#[tokio::test]
async fn failed_attempts_leave_gaps_in_keys() {
    init_tracing();
    let (assembler, handle) =
        scripted_assembler(vec![ok("1"), fail(), ok("3"), unusable(), ok("5")], 5);

    let batch = assembler.assemble(&CHAPTERS[0]).await.unwrap();

    assert_eq!(batch.len(), 3);
    assert_eq!(batch.attempt_indices(), vec![1, 3, 5]);
    assert_eq!(batch.failed(), 2);
    assert_eq!(batch.get(3).unwrap().question(), "Question 3?");
    assert!(batch.get(2).is_none());
    assert_eq!(handle.call_count(), 5);

    let value = serde_json::to_value(&batch).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    for key in ["question_1", "question_3", "question_5"] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert_eq!(value["question_5"]["options"][2], "Charlie 5");
}

#[tokio::test]
async fn no_retry_or_backfill_after_failures() {
    init_tracing();
    // Extra successes queued after the batch must stay unused.
    let (assembler, handle) = scripted_assembler(vec![fail(), fail(), ok("3"), ok("4")], 3);

    let batch = assembler.assemble(&CHAPTERS[1]).await.unwrap();

    assert_eq!(batch.attempt_indices(), vec![3]);
    assert_eq!(handle.call_count(), 3);
    assert_eq!(handle.remaining(), 1);
}

#[tokio::test]
async fn every_attempt_failing_is_empty_batch() {
    init_tracing();
    let (assembler, _) = scripted_assembler(vec![fail(), unusable(), fail()], 3);

    let err = assembler.assemble(&CHAPTERS[2]).await.unwrap_err();
    assert!(matches!(err, BatchError::EmptyBatch { chapter } if chapter == CHAPTERS[2].id));
}

#[tokio::test]
async fn prompts_target_the_requested_chapter() {
    let (assembler, handle) = scripted_assembler(vec![ok("1"), ok("2")], 2);

    let (chapter, _) = assembler
        .assemble_by_id("setting_financial_goals")
        .await
        .unwrap();

    assert_eq!(chapter.title, "Setting Financial Goals");
    assert_eq!(handle.prompts(), vec![build_prompt(chapter); 2]);
}

#[tokio::test]
async fn all_chapters_run_sequentially_in_registry_order() {
    init_tracing();
    let responses = (0..CHAPTERS.len() * 2).map(|i| ok(&i.to_string())).collect();
    let (assembler, handle) = scripted_assembler(responses, 2);

    let result = assembler.assemble_all().await.unwrap();

    let titles: Vec<&str> = CHAPTERS.iter().map(|c| c.title).collect();
    assert_eq!(result.titles(), titles);

    let expected: Vec<String> = CHAPTERS
        .iter()
        .flat_map(|c| [build_prompt(c), build_prompt(c)])
        .collect();
    assert_eq!(handle.prompts(), expected);

    // Each chapter's batch is finished before the next one starts.
    let third = result.get(CHAPTERS[2].title).unwrap();
    assert_eq!(third.get(1).unwrap().question(), "Question 4?");
    assert_eq!(third.get(2).unwrap().question(), "Question 5?");
}

#[tokio::test]
async fn chapters_without_successes_are_omitted() {
    init_tracing();
    let responses = vec![
        fail(), fail(),       // chapter 1
        ok("a"), fail(),      // chapter 2
        unusable(), fail(),   // chapter 3
        fail(), ok("b"),      // chapter 4
    ];
    let (assembler, _) = scripted_assembler(responses, 2);

    let result = assembler.assemble_all().await.unwrap();

    assert_eq!(result.titles(), vec![CHAPTERS[1].title, CHAPTERS[3].title]);
    assert_eq!(result.get(CHAPTERS[3].title).unwrap().attempt_indices(), vec![2]);
    assert!(result.get(CHAPTERS[0].title).is_none());
}

#[tokio::test]
async fn all_chapters_failing_is_total_failure() {
    init_tracing();
    let (assembler, handle) = scripted_assembler(Vec::new(), 2);

    let err = assembler.assemble_all().await.unwrap_err();

    assert!(matches!(err, BatchError::NoChapterSucceeded));
    assert_eq!(handle.call_count(), CHAPTERS.len() * 2);
}
