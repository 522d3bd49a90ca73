//! Command implementations.
//!
//! Handles:
//! - Loading configuration and applying CLI overrides
//! - Logging setup (stderr, so reports on stdout stay readable)
//! - serve: load the model once and run the HTTP service
//! - seed / audit / verify: run the batch job and print its report
//!
//! The `*_report` functions take an already-opened store and any writer so
//! they can be exercised without a terminal or a downloaded model.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use corpus_embeddings::{EmbeddingError, ModelCache, ModelSession};
use corpus_jobs::{
    audit, audit_store, builtin_corpus, seed, AuditStatus, Check, JobError, ReadinessVerifier,
    VerifyReport,
};
use corpus_service::{run_server, AppState};
use corpus_storage::{DocumentStore, Storage, StorageError, StoreLocation};
use corpus_types::{CorpusEntry, ModelSettings, Settings};

const RULE: &str = "============================================================";

/// Load configuration, apply the log level override, and install logging.
fn prepare(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    init_logging(&settings.log_level)?;
    Ok(settings)
}

fn init_logging(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Load the configured model, downloading it into the cache if needed.
pub fn load_session(model: &ModelSettings) -> Result<ModelSession, EmbeddingError> {
    let cache = ModelCache::new(&model.cache_dir, &model.identifier);
    ModelSession::load(&cache, model.batch_size)
}

fn banner<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(out, "{RULE}\n{title}\n{RULE}")?;
    Ok(())
}

/// Run the embedding service until Ctrl+C or SIGTERM.
///
/// A model that cannot be loaded is fatal: the service never starts
/// without a working session.
pub async fn serve(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    port_override: Option<u16>,
    host_override: Option<&str>,
) -> Result<()> {
    let mut settings = prepare(config_path, log_level_override)?;
    if let Some(port) = port_override {
        settings.service.port = port;
    }
    if let Some(host) = host_override {
        settings.service.host = host.to_string();
    }

    info!("Embedding service starting...");
    info!("  Model: {}", settings.model.identifier);
    info!("  Address: {}", settings.service_addr());

    let addr: SocketAddr = settings
        .service_addr()
        .parse()
        .context("Invalid service address")?;

    let model = settings.model.clone();
    let session = tokio::task::spawn_blocking(move || load_session(&model))
        .await
        .context("Model loading task failed")?
        .context("Failed to load embedding model")?;

    let state = AppState::new(
        Arc::new(session),
        settings.service.max_body_mb.saturating_mul(1024 * 1024),
    );
    run_server(addr, state).await?;
    Ok(())
}

/// `corpus seed`: returns the process exit code.
pub fn run_seed_command(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    no_clear: bool,
) -> Result<u8> {
    let settings = prepare(config_path, log_level_override)?;
    let mut out = std::io::stdout();

    banner(&mut out, "SEMANTIC CORPUS SEED")?;
    writeln!(out, "\nConnecting to store...")?;
    let storage = match StoreLocation::from_settings(&settings.store).and_then(|l| Storage::connect(&l)) {
        Ok(storage) => storage,
        Err(e) => {
            writeln!(out, "   Connection failed: {e}")?;
            return Ok(1);
        }
    };
    writeln!(out, "   Connected to {}", storage.location())?;

    writeln!(out, "\nLoading embedding model: {}", settings.model.identifier)?;
    writeln!(out, "   (this may take a moment on first run)...")?;
    let session = load_session(&settings.model).context("Failed to load embedding model")?;
    writeln!(out, "   Model loaded, output dimension: {}", session.dimension())?;

    seed_report(
        &storage,
        &session,
        &builtin_corpus(),
        !no_clear,
        &settings.store.vector_index,
        &mut out,
    )
}

/// Seed `corpus` and print the summary. Returns the exit code.
pub fn seed_report<S, W>(
    store: &S,
    session: &ModelSession,
    corpus: &[CorpusEntry],
    clear_existing: bool,
    vector_index: &str,
    out: &mut W,
) -> Result<u8>
where
    S: DocumentStore + ?Sized,
    W: Write,
{
    writeln!(out, "\nSeeding {} documents...", corpus.len())?;
    let report = match seed(store, session, corpus, clear_existing) {
        Ok(report) => report,
        Err(e) => {
            writeln!(out, "   Seeding failed: {e}")?;
            return Ok(1);
        }
    };

    match report.cleared {
        Some(0) => {}
        Some(n) => writeln!(out, "   Cleared {n} existing document(s)")?,
        None => writeln!(out, "   Skipped clear (--no-clear flag set)")?,
    }

    writeln!(out)?;
    banner(out, &format!("SUCCESS: Inserted {} documents", report.inserted()))?;

    writeln!(out, "\nCategory Breakdown:")?;
    for (category, count) in &report.categories {
        writeln!(out, "   - {category}: {count} docs")?;
    }

    writeln!(out, "\nTotal documents in collection: {}", report.stored_after)?;
    writeln!(out, "Embedding dimensions: {}", report.dimension)?;
    writeln!(out, "Index name expected: {vector_index}")?;

    if !report.is_consistent() {
        writeln!(
            out,
            "\nWARNING: expected {} documents in the collection but found {}",
            report.expected_after, report.stored_after
        )?;
    }

    writeln!(out)?;
    banner(out, "NEXT STEPS")?;
    writeln!(
        out,
        "   1. Create the vector index '{vector_index}' ({} dimensions) if not done",
        report.dimension
    )?;
    writeln!(out, "   2. Run: corpus audit  (verify embeddings)")?;
    writeln!(out, "   3. Run: corpus serve  (start the embedding service)")?;
    writeln!(out, "{RULE}")?;

    Ok(if report.is_consistent() { 0 } else { 1 })
}

/// `corpus audit`: returns the process exit code.
pub fn run_audit_command(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<u8> {
    let settings = prepare(config_path, log_level_override)?;
    let mut out = std::io::stdout();

    banner(&mut out, "SEMANTIC CORPUS EMBEDDING AUDIT")?;
    writeln!(out, "\nConnecting to store...")?;
    writeln!(out, "   URI: {}", settings.store.uri)?;
    writeln!(out, "   Database: {}", settings.store.database)?;
    writeln!(out, "   Collection: {}", settings.store.collection)?;

    let storage = match StoreLocation::from_settings(&settings.store)
        .and_then(|l| Storage::connect_read_only(&l))
    {
        Ok(storage) => storage,
        Err(e) => {
            writeln!(out, "   Connection failed: {e}")?;
            writeln!(out, "\nCheck store.uri in your configuration")?;
            return Ok(1);
        }
    };
    writeln!(out, "   Connection successful!")?;

    audit_report(&storage, settings.model.expected_dimension, &mut out)
}

/// Audit the store and print the report. Returns the exit code.
///
/// Findings never change the exit code; only an unreadable store does.
pub fn audit_report<S, W>(store: &S, expected_dimension: usize, out: &mut W) -> Result<u8>
where
    S: DocumentStore + ?Sized,
    W: Write,
{
    writeln!(out, "\nFetching documents...")?;
    let report = match audit_store(store, expected_dimension) {
        Ok(report) => report,
        Err(JobError::Storage(StorageError::CollectionNotFound { .. })) => {
            audit(&[], expected_dimension)
        }
        Err(e) => {
            writeln!(out, "   Read failed: {e}")?;
            return Ok(1);
        }
    };
    writeln!(out, "   Total documents found: {}\n", report.total())?;

    write!(out, "{report}")?;

    if report.status == AuditStatus::Checked {
        writeln!(out)?;
        banner(out, "NEXT STEPS")?;
        writeln!(out, "   1. If embeddings missing: run `corpus seed`")?;
        writeln!(out, "   2. If dimensions wrong: check model.identifier")?;
        writeln!(out, "   3. If all good: lower the similarity threshold to 0.0 and test search")?;
        writeln!(out, "   4. Check the `corpus serve` log for errors during search")?;
        writeln!(out, "{RULE}")?;
    }

    Ok(0)
}

/// `corpus verify`: returns the process exit code.
pub fn run_verify_command(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<u8> {
    let settings = prepare(config_path, log_level_override)?;
    let verifier = ReadinessVerifier::new(settings);
    verify_report(&verifier, &mut std::io::stdout())
}

/// Run every check, printing a header before each. Exit code 0 only if all
/// checks pass.
pub fn verify_report<W: Write>(verifier: &ReadinessVerifier, out: &mut W) -> Result<u8> {
    banner(out, "SEMANTIC CORPUS SETUP VERIFICATION")?;

    let total = Check::ALL.len();
    let mut checks = Vec::with_capacity(total);
    for (i, &check) in Check::ALL.iter().enumerate() {
        writeln!(out, "\n[{}/{}] {}", i + 1, total, check.name())?;
        out.flush()?;
        let result = verifier.run_check(check);
        writeln!(out, "  {result}")?;
        checks.push(result);
    }

    let report = VerifyReport { checks };
    writeln!(out, "\n{RULE}")?;
    writeln!(
        out,
        "RESULT: {}/{} checks passed",
        report.passed_count(),
        total
    )?;
    if report.all_passed() {
        writeln!(out, "All systems go! Infrastructure is ready.")?;
    } else {
        writeln!(out, "Some checks failed. Review the errors above.")?;
    }
    writeln!(out, "{RULE}")?;

    Ok(if report.all_passed() { 0 } else { 1 })
}
