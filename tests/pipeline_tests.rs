//! End-to-end pipeline tests with deterministic mock clients.
//!
//! These cover the full chunk → embed → index → retrieve flow without a
//! model server; the Ollama client itself is tested separately against a
//! mocked HTTP server in `ollama_tests.rs`.

mod common;

use std::sync::Arc;

use common::mocks::{FailingEmbedder, SequenceEmbedder, StubCompleter, StubEmbedder};
use futures::StreamExt;
use grail::llm::CompletionClient;
use grail::rag::{compose_prompt, CacheConfig, RagSession, SessionOptions, FALLBACK_ANSWER};
use grail::types::{AppError, Document};

fn options(chunk_size: usize) -> SessionOptions {
    SessionOptions {
        chunk_size,
        embed_concurrency: 1,
        cache: CacheConfig::default(),
    }
}

fn three_doc_corpus() -> (Vec<Document>, Arc<StubEmbedder>) {
    let docs = vec![
        Document::new("doc-a", "alpha"),
        Document::new("doc-b", "beta"),
        Document::new("doc-c", "gamma"),
    ];
    let embedder = Arc::new(
        StubEmbedder::new(2)
            .with_vector("alpha", vec![0.0, 0.0])
            .with_vector("beta", vec![1.0, 1.0])
            .with_vector("gamma", vec![5.0, 5.0])
            .with_vector("which one?", vec![1.0, 1.0]),
    );
    (docs, embedder)
}

#[tokio::test]
async fn retrieval_orders_chunks_by_distance() {
    let (docs, embedder) = three_doc_corpus();
    let session = RagSession::build(docs, embedder, options(100)).await.unwrap();

    assert_eq!(session.chunk_count(), 3);
    assert_eq!(session.dimensions(), 2);

    let retrieved = session.retrieve("which one?", 2).await.unwrap();

    assert_eq!(retrieved.len(), 2);
    assert_eq!(retrieved[0].position, 1);
    assert_eq!(retrieved[0].text, "beta");
    assert_eq!(retrieved[0].distance, 0.0);
    assert_eq!(retrieved[1].position, 0);
    assert_eq!(retrieved[1].text, "alpha");
    assert_eq!(retrieved[1].distance, 2.0);
}

#[tokio::test]
async fn retrieval_with_top_k_beyond_corpus_returns_everything() {
    let (docs, embedder) = three_doc_corpus();
    let session = RagSession::build(docs, embedder, options(100)).await.unwrap();

    let retrieved = session.retrieve("which one?", 50).await.unwrap();
    assert_eq!(retrieved.len(), 3);
}

#[tokio::test]
async fn whitespace_only_documents_fail_with_empty_index() {
    let docs = vec![
        Document::new("blank-1", "   \n\n  "),
        Document::new("blank-2", ""),
    ];
    // The chunk check runs before any embedding call, so even a failing
    // embedder never gets hit.
    let result = RagSession::build(docs, Arc::new(FailingEmbedder), options(100)).await;

    assert!(matches!(
        result,
        Err(AppError::Index(grail_vector::Error::EmptyIndex))
    ));
}

#[tokio::test]
async fn no_documents_fail_with_empty_index() {
    let result = RagSession::build(vec![], Arc::new(FailingEmbedder), options(100)).await;
    assert!(matches!(
        result,
        Err(AppError::Index(grail_vector::Error::EmptyIndex))
    ));
}

#[tokio::test]
async fn probe_failure_aborts_the_build() {
    let docs = vec![Document::new("doc", "some text")];
    let result = RagSession::build(docs, Arc::new(FailingEmbedder), options(100)).await;
    assert!(matches!(result, Err(AppError::Embedding(_))));
}

#[tokio::test]
async fn dimension_drift_after_probe_aborts_the_build() {
    // Probe establishes dimension 2; the second chunk embedding comes
    // back 3-dimensional and must abort ingestion.
    let embedder = SequenceEmbedder::new(vec![
        vec![0.0, 0.0],      // probe
        vec![0.5, 0.5],      // chunk 0
        vec![0.1, 0.2, 0.3], // chunk 1: wrong dimension
    ]);
    let docs = vec![
        Document::new("doc-a", "first text"),
        Document::new("doc-b", "second text"),
    ];

    let result = RagSession::build(docs, Arc::new(embedder), options(100)).await;

    match result {
        Err(AppError::Embedding(message)) => {
            assert!(message.contains("expected 2"), "got: {message}");
        }
        other => panic!("expected embedding error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn retrieved_positions_always_resolve_to_valid_chunks() {
    let docs = vec![
        Document::new("doc-a", "one two three four five six seven eight"),
        Document::new("doc-b", "nine ten eleven twelve thirteen fourteen"),
    ];
    let embedder = Arc::new(StubEmbedder::new(4));
    let session = RagSession::build(docs, embedder, options(12)).await.unwrap();

    assert!(session.chunk_count() > 2);

    let retrieved = session.retrieve("anything", 100).await.unwrap();
    assert_eq!(retrieved.len(), session.chunk_count());
    for chunk in &retrieved {
        assert!(chunk.position < session.chunk_count());
        assert_eq!(chunk.text, session.chunks()[chunk.position].text);
    }
}

#[tokio::test]
async fn repeated_queries_hit_the_embedding_cache() {
    let (docs, embedder) = three_doc_corpus();
    let session = RagSession::build(docs, embedder.clone(), options(100))
        .await
        .unwrap();

    // probe + three chunks
    assert_eq!(embedder.call_count(), 4);

    session.retrieve("which one?", 2).await.unwrap();
    assert_eq!(embedder.call_count(), 5);

    session.retrieve("which one?", 2).await.unwrap();
    assert_eq!(embedder.call_count(), 5, "second query should be cached");
    assert!(session.cache_stats().hits >= 1);
}

#[tokio::test]
async fn grounded_answer_flow_end_to_end() {
    let (docs, embedder) = three_doc_corpus();
    let session = RagSession::build(docs, embedder, options(100)).await.unwrap();

    let question = "which one?";
    let retrieved = session.retrieve(question, 2).await.unwrap();
    let prompt = compose_prompt(question, &retrieved);

    assert!(prompt.contains("beta"));
    assert!(prompt.contains("alpha"));
    assert!(prompt.contains(question));
    assert!(prompt.contains(FALLBACK_ANSWER));

    let completer = StubCompleter::new("a grounded answer");
    assert_eq!(
        completer.complete(&prompt).await.unwrap(),
        "a grounded answer"
    );

    // The streamed variant yields the same text in fragments
    let mut stream = completer.complete_stream(&prompt).await.unwrap();
    let mut streamed = String::new();
    while let Some(fragment) = stream.next().await {
        streamed.push_str(&fragment.unwrap());
    }
    assert_eq!(streamed, "a grounded answer");
}

#[tokio::test]
async fn concurrent_embedding_preserves_chunk_order() {
    // With 4 requests in flight, vectors must still land in chunk order;
    // each chunk's stored vector is checked via a zero-distance self query.
    let docs = vec![
        Document::new("doc-a", "red"),
        Document::new("doc-b", "green"),
        Document::new("doc-c", "blue"),
        Document::new("doc-d", "cyan"),
        Document::new("doc-e", "magenta"),
    ];
    let embedder = Arc::new(
        StubEmbedder::new(2)
            .with_vector("red", vec![1.0, 0.0])
            .with_vector("green", vec![2.0, 0.0])
            .with_vector("blue", vec![3.0, 0.0])
            .with_vector("cyan", vec![4.0, 0.0])
            .with_vector("magenta", vec![5.0, 0.0]),
    );

    let session = RagSession::build(
        docs,
        embedder,
        SessionOptions {
            chunk_size: 100,
            embed_concurrency: 4,
            cache: CacheConfig::default(),
        },
    )
    .await
    .unwrap();

    for (position, word) in ["red", "green", "blue", "cyan", "magenta"]
        .iter()
        .enumerate()
    {
        let retrieved = session.retrieve(word, 1).await.unwrap();
        assert_eq!(retrieved[0].position, position);
        assert_eq!(retrieved[0].distance, 0.0);
        assert_eq!(retrieved[0].text, *word);
    }
}
