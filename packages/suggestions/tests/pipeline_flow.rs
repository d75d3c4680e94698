//! End-to-end pipeline behavior: deduplication across a replay, fallback
//! handling, reference resolution, and forward progress under model failure.

use suggestions::testing::ScriptedModel;
use suggestions::{
    MemoryStore, NewStatement, RawStatement, ReplayScheduler, StatementStore, SuggestionError,
    SuggestionHub, SuggestionKind, SuggestionPipeline, SuggestionStore,
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

fn pipeline(model: ScriptedModel) -> SuggestionPipeline<MemoryStore, ScriptedModel> {
    SuggestionPipeline::new(MemoryStore::new(), model, SuggestionHub::new())
}

fn transcript(contents: &[&str]) -> Vec<RawStatement> {
    contents.iter().map(|c| RawStatement::new(*c)).collect()
}

/// A single-candidate model response.
fn response(kind: &str, description: &str, referenced: &str) -> String {
    serde_json::json!([{
        "type": kind,
        "title": "Suggestion",
        "description": description,
        "referenced_message": referenced,
    }])
    .to_string()
}

#[tokio::test(start_paused = true)]
async fn test_only_the_first_of_each_repeated_description_survives() {
    let model = ScriptedModel::new().with_responses([
        response("action_item", "Update the rollback playbook", "playbook"),
        // Exact repeat, then a restatement: both must be rejected.
        response("action_item", "Update the rollback playbook", "playbook"),
        response("action_item", "Update rollback playbook", "playbook"),
        response("action_item", "Check database replication lag", "replication"),
    ]);
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();

    let report = ReplayScheduler::new()
        .replay(
            &pipeline,
            incident_id,
            transcript(&["one", "two", "three", "four"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(report.statements_emitted, 4);
    assert_eq!(report.suggestions_created, 2);

    let descriptions = pipeline
        .store()
        .all_descriptions(incident_id)
        .await
        .unwrap();
    assert_eq!(
        descriptions,
        vec![
            "Update the rollback playbook",
            "Check database replication lag"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_prose_response_becomes_a_metadata_suggestion_on_the_trigger() {
    let raw_text = "I think you should restart the ingest workers.";
    let model = ScriptedModel::new().with_response(raw_text);
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();

    ReplayScheduler::new()
        .replay(
            &pipeline,
            incident_id,
            transcript(&["Workers are backed up"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let statements = pipeline
        .store()
        .statements_for_incident(incident_id)
        .await
        .unwrap();
    let suggestions = pipeline
        .store()
        .suggestions_for_incident(incident_id)
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].kind, SuggestionKind::Metadata);
    assert_eq!(suggestions[0].title, None);
    assert_eq!(suggestions[0].description, raw_text);
    assert_eq!(suggestions[0].statement_id, statements[0].id);
    assert_eq!(suggestions[0].content, "Workers are backed up");
}

#[tokio::test(start_paused = true)]
async fn test_quoted_passage_resolves_to_the_statement_it_extends() {
    let model = ScriptedModel::new()
        .with_response("[]")
        .with_response(response(
            "root_cause",
            "Logs show nothing relevant to the spike",
            "Checked the logs. Nothing found.",
        ));
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();

    ReplayScheduler::new()
        .replay(
            &pipeline,
            incident_id,
            transcript(&["Error rate spiked.", "Checked the logs."]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let statements = pipeline
        .store()
        .statements_for_incident(incident_id)
        .await
        .unwrap();
    let suggestions = pipeline
        .store()
        .suggestions_for_incident(incident_id)
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].statement_id, statements[1].id);
    assert_eq!(suggestions[0].content, "Checked the logs.");
}

#[tokio::test(start_paused = true)]
async fn test_unmatched_quote_references_the_triggering_statement() {
    let model = ScriptedModel::new()
        .with_response("[]")
        .with_response(response(
            "action_item",
            "Roll back the latest deployment",
            "something the model invented wholesale",
        ));
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();

    ReplayScheduler::new()
        .replay(
            &pipeline,
            incident_id,
            transcript(&["Error rate spiked.", "Checked the logs."]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let statements = pipeline
        .store()
        .statements_for_incident(incident_id)
        .await
        .unwrap();
    let suggestions = pipeline
        .store()
        .suggestions_for_incident(incident_id)
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 1);
    // Trigger was the second statement.
    assert_eq!(suggestions[0].statement_id, statements[1].id);
}

#[tokio::test(start_paused = true)]
async fn test_near_duplicates_within_one_response_both_land() {
    // The novelty gate compares against stored history, snapshotted once per
    // statement. Two candidates in the same response never see each other, so
    // a restatement pair in one response is admitted whole. Later statements
    // do see both.
    let batch = serde_json::json!([
        {
            "type": "action_item",
            "title": "Playbook",
            "description": "Update the rollback playbook",
            "referenced_message": "playbook"
        },
        {
            "type": "action_item",
            "title": "Playbook",
            "description": "Update rollback playbook",
            "referenced_message": "playbook"
        },
    ])
    .to_string();
    let model = ScriptedModel::new()
        .with_response(batch)
        .with_response(response("action_item", "Update the rollback playbook", "x"));
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();

    let report = ReplayScheduler::new()
        .replay(
            &pipeline,
            incident_id,
            transcript(&["one", "two"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(report.suggestions_created, 2);
    let descriptions = pipeline
        .store()
        .all_descriptions(incident_id)
        .await
        .unwrap();
    assert_eq!(
        descriptions,
        vec!["Update the rollback playbook", "Update rollback playbook"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_short_descriptions_never_survive() {
    let model = ScriptedModel::new().with_response(response("action_item", "ok", "x"));
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();

    let report = ReplayScheduler::new()
        .replay(
            &pipeline,
            incident_id,
            transcript(&["anything"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(report.suggestions_created, 0);
    assert_eq!(pipeline.store().suggestion_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_model_failure_skips_one_statement_not_the_replay() {
    let model = ScriptedModel::new()
        .with_response(response("action_item", "Update the rollback playbook", "x"))
        .with_error("connection refused")
        .with_response(response("action_item", "Check database replication lag", "y"));
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();

    let report = ReplayScheduler::new()
        .replay(
            &pipeline,
            incident_id,
            transcript(&["one", "two", "three"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    // The failed statement is still persisted; only its extraction is lost.
    assert_eq!(report.statements_emitted, 3);
    assert_eq!(report.failed_statements, 1);
    assert_eq!(report.suggestions_created, 2);
    assert!(!report.is_complete());
    assert_eq!(
        pipeline
            .store()
            .statements_for_incident(incident_id)
            .await
            .unwrap()
            .len(),
        3
    );
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_receive_each_persisted_suggestion() {
    let model = ScriptedModel::new()
        .with_response(response("action_item", "Update the rollback playbook", "x"))
        .with_response(response(
            "root_cause",
            "Check database replication lag",
            "y",
        ));
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();
    let mut rx = pipeline.hub().subscribe();

    ReplayScheduler::new()
        .replay(
            &pipeline,
            incident_id,
            transcript(&["one", "two"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.description, "Update the rollback playbook");
    assert_eq!(second.description, "Check database replication lag");

    let stored = pipeline
        .store()
        .suggestions_for_incident(incident_id)
        .await
        .unwrap();
    assert_eq!(stored, vec![first, second]);
}

#[tokio::test(start_paused = true)]
async fn test_one_subscription_sees_every_incidents_suggestions() {
    let model = ScriptedModel::new()
        .with_response(response("action_item", "Update the rollback playbook", "x"))
        .with_response(response(
            "root_cause",
            "Check database replication lag",
            "y",
        ));
    let pipeline = pipeline(model);
    let incident_a = Uuid::new_v4();
    let incident_b = Uuid::new_v4();

    // Subscribed before either incident exists: the stream is per deployment,
    // not per incident.
    let mut rx = pipeline.hub().subscribe();

    let scheduler = ReplayScheduler::new();
    scheduler
        .replay(
            &pipeline,
            incident_a,
            transcript(&["incident a"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();
    scheduler
        .replay(
            &pipeline,
            incident_b,
            transcript(&["incident b"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.incident_id, incident_a);
    assert_eq!(second.incident_id, incident_b);
}

#[tokio::test(start_paused = true)]
async fn test_ingest_statement_persists_then_extracts() {
    let model = ScriptedModel::new().with_response(response(
        "action_item",
        "Update the rollback playbook",
        "x",
    ));
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();
    let mut window = pipeline.window(incident_id);

    let (statement, suggestions) = pipeline
        .ingest_statement(
            &mut window,
            NewStatement::new(incident_id, "the playbook is stale").with_speaker("dana"),
        )
        .await
        .unwrap();

    assert_eq!(statement.content, "the playbook is stale");
    assert_eq!(statement.speaker.as_deref(), Some("dana"));
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].description, "Update the rollback playbook");
    assert_eq!(suggestions[0].statement_id, statement.id);

    let stored = pipeline
        .store()
        .statements_for_incident(incident_id)
        .await
        .unwrap();
    assert_eq!(stored, vec![statement]);
}

#[tokio::test(start_paused = true)]
async fn test_second_replay_appends_and_still_deduplicates() {
    let model = ScriptedModel::new()
        .with_response(response("action_item", "Update the rollback playbook", "x"))
        // Second replay repeats the first replay's description, then adds a
        // new one.
        .with_response(response("action_item", "Update the rollback playbook", "x"))
        .with_response(response(
            "root_cause",
            "Check database replication lag",
            "y",
        ));
    let pipeline = pipeline(model);
    let incident_id = Uuid::new_v4();
    let scheduler = ReplayScheduler::new();

    scheduler
        .replay(
            &pipeline,
            incident_id,
            transcript(&["first run"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();
    scheduler
        .replay(
            &pipeline,
            incident_id,
            transcript(&["second run a", "second run b"]),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let statements = pipeline
        .store()
        .statements_for_incident(incident_id)
        .await
        .unwrap();
    assert_eq!(statements.len(), 3);
    let descriptions = pipeline
        .store()
        .all_descriptions(incident_id)
        .await
        .unwrap();
    assert_eq!(
        descriptions,
        vec![
            "Update the rollback playbook",
            "Check database replication lag"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_empty_transcript_is_a_noop() {
    let model = ScriptedModel::new();
    let pipeline = pipeline(model.clone());

    let report = ReplayScheduler::new()
        .replay(
            &pipeline,
            Uuid::new_v4(),
            Vec::new(),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(report, Default::default());
    assert_eq!(model.call_count(), 0);
    assert_eq!(pipeline.store().statement_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_document_fails_before_anything_is_created() {
    let model = ScriptedModel::new();
    let pipeline = pipeline(model.clone());

    let err = ReplayScheduler::new()
        .replay_transcript(
            &pipeline,
            Uuid::new_v4(),
            "this is not a transcript",
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SuggestionError::InvalidTranscript { .. }));
    assert_eq!(model.call_count(), 0);
    assert_eq!(pipeline.store().statement_count(), 0);
}
