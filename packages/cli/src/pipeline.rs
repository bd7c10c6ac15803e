//! Sequential batch pipeline: PDF text -> completion -> record.
//!
//! Documents are processed strictly one at a time, in sorted file-name
//! order. Each per-document failure (unreadable PDF, completion failure,
//! missing fenced block, malformed JSON) is captured as a
//! [`DocumentFailure`]; whether a failure skips the document or aborts the
//! whole batch is an explicit [`ErrorPolicy`], not an accident of error
//! propagation. The output file is written exactly once, after the loop.

use std::path::PathBuf;
use std::time::Instant;

use fund_sheets_ai::providers::CompletionProvider;
use fund_sheets_ai::{AiError, prompt, response};
use fund_sheets_schema::{ExtractedRecord, map_fields};
use indicatif::{MultiProgress, ProgressBar};

use crate::progress;

/// What to do when a single document fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure, record it in the summary, and continue.
    Skip,
    /// Abort the whole batch; no output file is written.
    Halt,
}

/// One input document with its already-extracted text.
pub struct Document {
    /// Source file path, used for reporting only.
    pub path: PathBuf,
    /// Full plain-text content.
    pub text: String,
}

/// A document the batch could not turn into a record.
#[derive(Debug)]
pub struct DocumentFailure {
    /// Source file path.
    pub path: PathBuf,
    /// Why it failed.
    pub error: DocumentError,
}

/// Ways a single document can fail.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// PDF text extraction failed.
    #[error(transparent)]
    Pdf(#[from] fund_sheets_pdf::PdfError),

    /// The completion call failed.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// The model response contained no fenced JSON block.
    #[error("no fenced JSON block in model response")]
    NoJsonBlock,

    /// The first fenced block was not valid JSON.
    #[error("invalid JSON in model response: {0}")]
    Json(#[from] serde_json::Error),

    /// The first fenced block parsed, but not to a JSON object.
    #[error("model response JSON is not an object")]
    NotAnObject,
}

/// Fatal pipeline errors (as opposed to skippable per-document ones).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A document failed under [`ErrorPolicy::Halt`].
    #[error("failed to process {}: {error}", .path.display())]
    Document {
        /// The failing document.
        path: PathBuf,
        /// Why it failed.
        error: DocumentError,
    },

    /// The input directory could not be listed.
    #[error(transparent)]
    Pdf(#[from] fund_sheets_pdf::PdfError),

    /// Writing the output table failed.
    #[error(transparent)]
    Export(#[from] fund_sheets_export::ExportError),
}

/// Result of a batch run: the rows that made it, and the documents that
/// did not.
pub struct BatchOutcome {
    /// Extracted rows, in document order.
    pub records: Vec<ExtractedRecord>,
    /// Documents that failed (always empty under [`ErrorPolicy::Halt`],
    /// which aborts instead).
    pub failures: Vec<DocumentFailure>,
}

/// Options for a directory extraction run.
pub struct ExtractOptions {
    /// Directory containing fact sheet PDFs.
    pub input: PathBuf,
    /// Output CSV path.
    pub output: PathBuf,
    /// Per-document failure policy.
    pub policy: ErrorPolicy,
    /// Process at most this many documents.
    pub limit: Option<usize>,
}

/// Extracts one record from one document's text.
///
/// Builds the prompt, makes the single completion call (no retry), takes
/// the first fenced JSON block of the response, parses it, and completes
/// it against the field schema. Later blocks in the same response are
/// ignored.
///
/// # Errors
///
/// Returns [`DocumentError`] describing the first step that failed.
pub async fn extract_record(
    provider: &dyn CompletionProvider,
    text: &str,
) -> Result<ExtractedRecord, DocumentError> {
    let prompt = prompt::build_extraction_prompt(text);
    let reply = provider.complete(&prompt).await?;

    let block = response::json_blocks(&reply)
        .next()
        .ok_or(DocumentError::NoJsonBlock)?;

    let parsed: serde_json::Value = serde_json::from_str(&block)?;
    let serde_json::Value::Object(object) = parsed else {
        return Err(DocumentError::NotAnObject);
    };

    Ok(map_fields(&object))
}

/// Runs the batch loop over already-extracted documents.
///
/// # Errors
///
/// Returns [`PipelineError::Document`] if a document fails under
/// [`ErrorPolicy::Halt`].
pub async fn run_batch(
    provider: &dyn CompletionProvider,
    documents: Vec<Document>,
    policy: ErrorPolicy,
    bar: Option<&ProgressBar>,
) -> Result<BatchOutcome, PipelineError> {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for document in documents {
        if let Some(bar) = bar {
            bar.set_message(display_name(&document.path));
        }

        match extract_record(provider, &document.text).await {
            Ok(record) => records.push(record),
            Err(error) => handle_failure(document.path, error, policy, &mut failures)?,
        }

        if let Some(bar) = bar {
            bar.inc(1);
        }
    }

    Ok(BatchOutcome { records, failures })
}

/// Applies the failure policy to one failed document.
fn handle_failure(
    path: PathBuf,
    error: DocumentError,
    policy: ErrorPolicy,
    failures: &mut Vec<DocumentFailure>,
) -> Result<(), PipelineError> {
    match policy {
        ErrorPolicy::Skip => {
            log::error!("Skipping {}: {error}", path.display());
            failures.push(DocumentFailure { path, error });
            Ok(())
        }
        ErrorPolicy::Halt => Err(PipelineError::Document { path, error }),
    }
}

/// Runs the full directory extraction: list -> extract text -> complete ->
/// map -> export once.
///
/// # Errors
///
/// Returns [`PipelineError`] if the input directory cannot be listed, a
/// document fails under [`ErrorPolicy::Halt`], or the export fails.
pub async fn run(
    provider: &dyn CompletionProvider,
    options: &ExtractOptions,
    multi: &MultiProgress,
) -> Result<(), PipelineError> {
    let start = Instant::now();

    let mut paths = fund_sheets_pdf::list_documents(&options.input)?;
    if let Some(limit) = options.limit {
        paths.truncate(limit);
    }

    log::info!(
        "Processing {} fact sheet(s) from {}",
        paths.len(),
        options.input.display()
    );

    // Text extraction failures fall under the same policy as everything
    // else that can go wrong with a document.
    let mut documents = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        match fund_sheets_pdf::extract_text(&path) {
            Ok(text) => documents.push(Document { path, text }),
            Err(e) => handle_failure(path, e.into(), options.policy, &mut failures)?,
        }
    }

    let bar = progress::documents_bar(multi, documents.len() as u64);
    let outcome = match run_batch(provider, documents, options.policy, Some(&bar)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            bar.abandon();
            return Err(e);
        }
    };
    bar.finish_and_clear();
    failures.extend(outcome.failures);

    fund_sheets_export::write_csv(&options.output, &outcome.records)?;

    log::info!(
        "Extraction complete: {} succeeded, {} failed in {:.1}s -> {}",
        outcome.records.len(),
        failures.len(),
        start.elapsed().as_secs_f64(),
        options.output.display()
    );
    for failure in &failures {
        log::warn!("Failed: {}: {}", failure.path.display(), failure.error);
    }

    Ok(())
}

/// File name of `path` for progress messages.
fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use fund_sheets_schema::FIELDS;
    use serde_json::Value;

    use super::*;

    /// Provider that replays canned responses in order.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<String, String>>>,
    }

    impl ScriptedProvider {
        fn new<const N: usize>(responses: [Result<&str, &str>; N]) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|r| r.map(str::to_owned).map_err(str::to_owned))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait::async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra completion call")
                .map_err(|message| AiError::Provider { message })
        }
    }

    fn document(name: &str) -> Document {
        Document {
            path: PathBuf::from(name),
            text: format!("text of {name}"),
        }
    }

    #[tokio::test]
    async fn response_fields_land_in_the_record_and_the_rest_default() {
        let provider = ScriptedProvider::new([Ok(
            "Some preamble text\n\
             ```json\n\
             {\"Product Name\": \"Alpha Fund\", \"Currency\": \"USD\"}\n\
             ```\n\
             trailing text",
        )]);

        let record = extract_record(&provider, "doc text").await.unwrap();

        assert_eq!(
            record.get("Product Name"),
            Some(&serde_json::json!("Alpha Fund"))
        );
        assert_eq!(record.get("Currency"), Some(&serde_json::json!("USD")));
        let empties = FIELDS
            .iter()
            .filter(|f| record.get(f) == Some(&Value::String(String::new())))
            .count();
        assert_eq!(empties, FIELDS.len() - 2);
    }

    #[tokio::test]
    async fn only_the_first_fenced_block_is_used() {
        let provider = ScriptedProvider::new([Ok(
            "```json\n\
             {\"Product Name\": \"First\"}\n\
             ```\n\
             ```json\n\
             {\"Product Name\": \"Second\"}\n\
             ```",
        )]);

        let record = extract_record(&provider, "doc text").await.unwrap();
        assert_eq!(
            record.get("Product Name"),
            Some(&serde_json::json!("First"))
        );
    }

    #[tokio::test]
    async fn missing_block_and_bad_json_are_document_errors() {
        let provider = ScriptedProvider::new([Ok("no fences here")]);
        assert!(matches!(
            extract_record(&provider, "t").await,
            Err(DocumentError::NoJsonBlock)
        ));

        let provider = ScriptedProvider::new([Ok("```json\n{not valid}\n```")]);
        assert!(matches!(
            extract_record(&provider, "t").await,
            Err(DocumentError::Json(_))
        ));

        let provider = ScriptedProvider::new([Ok("```json\n[1, 2]\n```")]);
        assert!(matches!(
            extract_record(&provider, "t").await,
            Err(DocumentError::NotAnObject)
        ));
    }

    #[tokio::test]
    async fn skip_policy_records_the_failure_and_continues() {
        let provider = ScriptedProvider::new([
            Ok("no block"),
            Ok("```json\n{\"Product Name\": \"Beta Fund\"}\n```"),
        ]);

        let outcome = run_batch(
            &provider,
            vec![document("a.pdf"), document("b.pdf")],
            ErrorPolicy::Skip,
            None,
        )
        .await
        .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.records[0].get("Product Name"),
            Some(&serde_json::json!("Beta Fund"))
        );
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].path, PathBuf::from("a.pdf"));
    }

    #[tokio::test]
    async fn halt_policy_aborts_on_the_first_failure() {
        let provider = ScriptedProvider::new([Err("service unavailable")]);

        let result = run_batch(
            &provider,
            vec![document("a.pdf"), document("b.pdf")],
            ErrorPolicy::Halt,
            None,
        )
        .await;

        let Err(PipelineError::Document { path, .. }) = result else {
            panic!("expected halt on the first failing document");
        };
        assert_eq!(path, PathBuf::from("a.pdf"));
    }

    #[tokio::test]
    async fn zero_documents_yield_an_empty_outcome() {
        let provider = ScriptedProvider::new([]);

        let outcome = run_batch(&provider, Vec::new(), ErrorPolicy::Skip, None)
            .await
            .unwrap();

        assert!(outcome.records.is_empty());
        assert!(outcome.failures.is_empty());
    }
}
