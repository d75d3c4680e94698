//! Replays a short incident transcript and prints suggestions as they arrive.
//!
//! Uses the scripted model backend so it runs without an API key; swap in
//! `GeminiModel::from_env()?` to extract with a live model instead.
//!
//! ```sh
//! cargo run -p suggestions --example replay_demo
//! ```

use std::time::Duration;

use suggestions::testing::ScriptedModel;
use suggestions::{
    MemoryStore, ReplayConfig, ReplayScheduler, SuggestionHub, SuggestionPipeline,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const TRANSCRIPT: &str = r#"{
    "meeting_transcript": [
        { "speaker": "dana", "text": "Pages are firing - error rate on the web tier has spiked." },
        { "speaker": "sam", "text": "Users can't even load the homepage." },
        { "speaker": "dana", "text": "Whoa - 100% CPU on postgres." },
        { "speaker": "sam", "text": "Deploy #341 went out twenty minutes ago. Rolling it back." },
        { "speaker": "dana", "text": "Okay, found the rollback playbook. It's in Confluence, but it looks... really outdated." },
        { "speaker": "sam", "text": "Rollback finished, error rate is dropping." }
    ]
}"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Scripted responses standing in for the live model, one per statement.
    let model = ScriptedModel::new().with_responses([
        r#"[]"#,
        r#"[{ "type": "trigger_event", "title": "Homepage Down", "description": "Homepage is failing to load for users, indicating a full web-tier outage.", "referenced_message": "Users can't even load the homepage." }]"#,
        r#"[{ "type": "root_cause", "title": "Database Spike", "description": "Postgres CPU is pegged at 100%, the likely cause of the web-tier errors.", "referenced_message": "Whoa - 100% CPU on postgres." }]"#,
        r#"[{ "type": "action_item", "title": "Rollback Deploy", "description": "Roll back deploy #341, which shipped shortly before the spike.", "referenced_message": "Deploy #341 went out twenty minutes ago." }]"#,
        r#"[{ "type": "action_item", "title": "Rollback Playbook", "description": "Update the outdated rollback playbook in Confluence.", "referenced_message": "Okay, found the rollback playbook." }]"#,
        // Restates the playbook suggestion; the novelty filter drops it.
        r#"[{ "type": "action_item", "title": "Playbook", "description": "Update the outdated rollback playbook in Confluence!", "referenced_message": "really outdated" }]"#,
    ]);

    let pipeline = SuggestionPipeline::new(MemoryStore::new(), model, SuggestionHub::new());
    let incident_id = Uuid::new_v4();

    let mut rx = pipeline.hub().subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(suggestion) = rx.recv().await {
            println!(
                "[{}] {} - {}",
                suggestion.kind.as_str(),
                suggestion.title.as_deref().unwrap_or("(untitled)"),
                suggestion.description
            );
        }
    });

    // Compress the default 60-second window so the demo finishes quickly.
    let scheduler =
        ReplayScheduler::with_config(ReplayConfig::new().with_total_duration(Duration::from_secs(6)));
    let report = scheduler
        .replay_transcript(&pipeline, incident_id, TRANSCRIPT, CancellationToken::new())
        .await?;

    println!(
        "replayed {} statements, kept {} suggestions",
        report.statements_emitted, report.suggestions_created
    );

    // Dropping the pipeline closes the hub channel; the printer drains what
    // is left and exits.
    drop(pipeline);
    let _ = printer.await;
    Ok(())
}
