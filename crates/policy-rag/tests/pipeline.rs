//! Ingestion → retrieval → reasoning over a real on-disk index

mod common;

use common::{words, Harness, ScriptedLlm, APPROVED_REPLY};
use policy_rag::config::RagConfig;
use policy_rag::ingestion::FileParser;
use policy_rag::{DecisionKind, Error};
use std::sync::Arc;

#[tokio::test]
async fn reingesting_identical_content_is_idempotent() {
    let harness = Harness::new(RagConfig::default(), ScriptedLlm::replying(APPROVED_REPLY));
    let body = words(500);

    let first = harness
        .pipeline
        .ingest(body.clone().into_bytes(), "policy.pdf")
        .await
        .unwrap();
    let count = harness.indexed().await;

    let second = harness
        .pipeline
        .ingest(body.into_bytes(), "policy.pdf")
        .await
        .unwrap();

    assert_eq!(first.chunk_ids, second.chunk_ids);
    assert_eq!(harness.indexed().await, count);
    assert_eq!(count, first.chunks_indexed());
}

#[tokio::test]
async fn seven_hundred_words_make_three_records() {
    let harness = Harness::new(RagConfig::default(), ScriptedLlm::replying(APPROVED_REPLY));

    let report = harness
        .pipeline
        .ingest(words(700).into_bytes(), "policy.pdf")
        .await
        .unwrap();

    assert_eq!(report.filename, "policy.pdf");
    assert_eq!(report.chunks_indexed(), 3);
    assert_eq!(harness.indexed().await, 3);
}

#[tokio::test]
async fn unrelated_index_still_yields_a_decision() {
    let harness = Harness::new(RagConfig::default(), ScriptedLlm::replying(APPROVED_REPLY));

    harness
        .pipeline
        .ingest(
            b"Dental cleaning is reimbursed twice per policy year.".to_vec(),
            "dental.pdf",
        )
        .await
        .unwrap();
    harness
        .pipeline
        .ingest(
            b"Room rent is capped at one percent of the sum insured.".to_vec(),
            "rent.pdf",
        )
        .await
        .unwrap();

    let decision = harness.pipeline.answer("knee surgery claim", Some(8)).await;
    assert_eq!(decision.decision, DecisionKind::Approved);
    assert_eq!(decision.amount, Some(5000.0));

    let prompts = harness.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("knee surgery claim"));
    assert!(prompts[0].contains("dental.pdf"));
    assert!(prompts[0].contains("rent.pdf"));
    assert!(!prompts[0].contains("[3]"));
}

#[tokio::test]
async fn empty_index_still_reaches_the_model() {
    let harness = Harness::new(RagConfig::default(), ScriptedLlm::replying(APPROVED_REPLY));

    let decision = harness.pipeline.answer("knee surgery claim", None).await;

    assert_eq!(decision.decision, DecisionKind::Approved);
    assert_eq!(harness.llm.prompts().len(), 1);
}

#[tokio::test]
async fn unparsable_model_output_falls_back() {
    let harness = Harness::new(RagConfig::default(), ScriptedLlm::replying("not json at all"));
    harness
        .pipeline
        .ingest(words(50).into_bytes(), "policy.pdf")
        .await
        .unwrap();

    let decision = harness.pipeline.answer("knee surgery claim", None).await;

    assert_eq!(decision.decision, DecisionKind::Error);
    assert_eq!(decision.amount, None);
    assert!(decision.clauses.is_empty());
    assert!(decision.justification.chars().count() <= 30);
}

#[tokio::test]
async fn model_outage_falls_back() {
    let harness = Harness::new(RagConfig::default(), ScriptedLlm::failing("connection refused"));

    let decision = harness.pipeline.answer("knee surgery claim", None).await;

    assert!(decision.is_error());
    assert!(decision.clauses.is_empty());
}

#[tokio::test]
async fn zero_k_falls_back_without_calling_the_model() {
    let harness = Harness::new(RagConfig::default(), ScriptedLlm::replying(APPROVED_REPLY));

    let decision = harness.pipeline.answer("knee surgery claim", Some(0)).await;

    assert!(decision.is_error());
    assert!(harness.llm.prompts().is_empty());
}

#[tokio::test]
async fn unsupported_format_indexes_nothing() {
    let harness = Harness::new(RagConfig::default(), ScriptedLlm::replying(APPROVED_REPLY));

    let err = harness
        .pipeline
        .ingest(b"plain notes".to_vec(), "notes.txt")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedFileType(_)));
    assert_eq!(harness.indexed().await, 0);
}

#[tokio::test]
async fn mail_messages_are_indexed_with_the_real_parser() {
    let harness = Harness::with_extractor(
        RagConfig::default(),
        ScriptedLlm::replying(APPROVED_REPLY),
        Arc::new(FileParser),
    );

    let raw = b"From: claims@example.com\r\n\
To: desk@example.com\r\n\
Subject: Knee surgery claim\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Policy holder requests reimbursement for knee surgery in Pune.\r\n";

    let report = harness.pipeline.ingest(raw.to_vec(), "claim.eml").await.unwrap();

    assert_eq!(report.chunks_indexed(), 1);
    assert_eq!(harness.indexed().await, 1);
}
