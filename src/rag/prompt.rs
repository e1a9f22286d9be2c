//! Grounding prompt assembly.

use crate::types::RetrievedChunk;

/// The exact sentence the model is instructed to emit when the retrieved
/// context does not contain an answer.
pub const FALLBACK_ANSWER: &str = "Sorry, the documents do not contain relevant information.";

/// Separator placed between retrieved chunks in the context block.
const CONTEXT_SEPARATOR: &str = "\n";

/// Build the grounding prompt for a question and its retrieved chunks.
///
/// Chunk texts are joined in retrieval order (best match first) into a
/// context block; the surrounding template constrains the model to answer
/// only from that context and to fall back to [`FALLBACK_ANSWER`] when it
/// is insufficient. Stateless; no error conditions.
pub fn compose_prompt(question: &str, chunks: &[RetrievedChunk]) -> String {
    let context = chunks
        .iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);

    format!(
        "You are a document question-answering assistant.\n\
         Answer only from the document content provided below.\n\
         If the answer cannot be found there, reply exactly: \"{FALLBACK_ANSWER}\"\n\
         \n\
         Document content:\n\
         {context}\n\
         \n\
         User question: {question}\n\
         Answer in natural language, summarizing or rephrasing the relevant content:"
    )
}
