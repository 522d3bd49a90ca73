//! Readiness verification.
//!
//! Six independent checks run in a fixed order. A failing check never stops
//! the ones after it, so one run shows every problem at once. The aggregate
//! result is the AND of all checks.

use std::fmt;
use std::path::Path;

use tracing::debug;

use corpus_embeddings::{EmbeddingError, ModelCache, ModelSession};
use corpus_storage::{Storage, StoreLocation};
use corpus_types::{ModelSettings, Settings};

/// Compiler the binaries were built with, recorded by the build script.
const RUSTC_VERSION: &str = env!("CORPUS_RUSTC_VERSION");

/// Text encoded to confirm the loaded model works end to end.
const MODEL_CHECK_TEXT: &str = "test sentence";

/// The readiness checks, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Toolchain,
    ModelCache,
    Configuration,
    StorePing,
    CollectionAccess,
    EmbeddingModel,
}

impl Check {
    pub const ALL: [Check; 6] = [
        Check::Toolchain,
        Check::ModelCache,
        Check::Configuration,
        Check::StorePing,
        Check::CollectionAccess,
        Check::EmbeddingModel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Check::Toolchain => "Rust toolchain",
            Check::ModelCache => "Model cache",
            Check::Configuration => "Configuration",
            Check::StorePing => "Store ping",
            Check::CollectionAccess => "Collection access",
            Check::EmbeddingModel => "Embedding model",
        }
    }
}

/// Builds a model session for the model check.
pub type ModelLoader =
    Box<dyn Fn(&ModelSettings) -> Result<ModelSession, EmbeddingError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{}] {}: {}", mark, self.name, self.detail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub checks: Vec<CheckResult>,
}

impl VerifyReport {
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

pub struct ReadinessVerifier {
    settings: Settings,
    load_model: ModelLoader,
}

impl ReadinessVerifier {
    /// Verifier that loads the configured Candle model for the model check.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            load_model: Box::new(|model: &ModelSettings| {
                let cache = ModelCache::new(&model.cache_dir, &model.identifier);
                ModelSession::load(&cache, model.batch_size)
            }),
        }
    }

    /// Replace how the model check obtains a session.
    pub fn with_model_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn(&ModelSettings) -> Result<ModelSession, EmbeddingError> + Send + Sync + 'static,
    {
        self.load_model = Box::new(loader);
        self
    }

    /// Run every check. Failures never skip later checks.
    pub fn verify(&self) -> VerifyReport {
        VerifyReport {
            checks: Check::ALL.iter().map(|&check| self.run_check(check)).collect(),
        }
    }

    pub fn run_check(&self, check: Check) -> CheckResult {
        let outcome = match check {
            Check::Toolchain => self.check_toolchain(),
            Check::ModelCache => self.check_model_cache(),
            Check::Configuration => self.check_configuration(),
            Check::StorePing => self.check_store_ping(),
            Check::CollectionAccess => self.check_collection(),
            Check::EmbeddingModel => self.check_model(),
        };
        let (passed, detail) = match outcome {
            Ok(detail) => (true, detail),
            Err(detail) => (false, detail),
        };
        debug!(check = check.name(), passed, "Readiness check finished");
        CheckResult {
            name: check.name(),
            passed,
            detail,
        }
    }

    fn check_toolchain(&self) -> Result<String, String> {
        check_rustc_version(RUSTC_VERSION, &self.settings.verify.min_rust_version)
    }

    fn check_model_cache(&self) -> Result<String, String> {
        let model = &self.settings.model;
        let dir = Path::new(&model.cache_dir);
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create model cache {}: {}", dir.display(), e))?;
        let metadata = std::fs::metadata(dir)
            .map_err(|e| format!("Cannot read model cache {}: {}", dir.display(), e))?;
        if metadata.permissions().readonly() {
            return Err(format!("Model cache {} is read-only", dir.display()));
        }

        let cache = ModelCache::new(&model.cache_dir, &model.identifier);
        let state = if cache.is_cached() {
            "model files present"
        } else {
            "model files will be downloaded on first use"
        };
        Ok(format!("{} ({})", dir.display(), state))
    }

    fn check_configuration(&self) -> Result<String, String> {
        let missing = self.settings.missing_required();
        if missing.is_empty() {
            Ok("All required settings present".to_string())
        } else {
            Err(format!("Missing settings: {}", missing.join(", ")))
        }
    }

    fn open_store(&self) -> Result<Storage, String> {
        let location =
            StoreLocation::from_settings(&self.settings.store).map_err(|e| e.to_string())?;
        Storage::connect_read_only(&location).map_err(|e| e.to_string())
    }

    fn check_store_ping(&self) -> Result<String, String> {
        let storage = self.open_store()?;
        storage.ping().map_err(|e| e.to_string())?;
        Ok(format!("Ping successful ({})", storage.location().path().display()))
    }

    fn check_collection(&self) -> Result<String, String> {
        let storage = self.open_store()?;
        let count = storage.count_documents().map_err(|e| e.to_string())?;
        Ok(format!(
            "Collection '{}' accessible ({} docs)",
            self.settings.store.collection, count
        ))
    }

    fn check_model(&self) -> Result<String, String> {
        let model = &self.settings.model;
        let session = (self.load_model)(model).map_err(|e| e.to_string())?;
        let vector = session
            .encode(MODEL_CHECK_TEXT)
            .map_err(|e| e.to_string())?;

        let dim = vector.len();
        if dim != model.expected_dimension {
            return Err(format!(
                "Expected {} dims, got {}",
                model.expected_dimension, dim
            ));
        }
        Ok(format!("Model loaded, output dim = {}", dim))
    }
}

/// Compare `rustc --version` output against a `major.minor` floor.
fn check_rustc_version(rustc: &str, minimum: &str) -> Result<String, String> {
    let found = rustc
        .split_whitespace()
        .nth(1)
        .and_then(parse_major_minor)
        .ok_or_else(|| format!("Could not determine compiler version from '{}'", rustc))?;
    let floor = parse_major_minor(minimum)
        .ok_or_else(|| format!("Invalid minimum version '{}'", minimum))?;

    if found < floor {
        return Err(format!(
            "{} found, need >= {}.{}",
            rustc, floor.0, floor.1
        ));
    }
    Ok(rustc.to_string())
}

fn parse_major_minor(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor_digits: String = parts
        .next()?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    Some((major, minor_digits.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus_embeddings::MockEmbedder;
    use tempfile::TempDir;

    fn settings(temp: &TempDir) -> Settings {
        let mut settings = Settings::default();
        settings.store.uri = temp.path().join("store").to_string_lossy().to_string();
        settings.model.cache_dir = temp.path().join("models").to_string_lossy().to_string();
        settings.model.expected_dimension = 32;
        settings
    }

    fn mock_loader(
        dim: usize,
    ) -> impl Fn(&ModelSettings) -> Result<ModelSession, EmbeddingError> + Send + Sync + 'static {
        move |model: &ModelSettings| {
            ModelSession::from_model(&model.identifier, Box::new(MockEmbedder::new(dim)), 8)
        }
    }

    #[test]
    fn test_parse_major_minor() {
        assert_eq!(parse_major_minor("1.82.0"), Some((1, 82)));
        assert_eq!(parse_major_minor("1.85.0-nightly"), Some((1, 85)));
        assert_eq!(parse_major_minor("1.80"), Some((1, 80)));
        assert_eq!(parse_major_minor("banana"), None);
    }

    #[test]
    fn test_rustc_version_floor() {
        assert!(check_rustc_version("rustc 1.82.0 (f6e511eec 2024-10-15)", "1.80").is_ok());
        assert!(check_rustc_version("rustc 1.75.0 (82e1608df 2023-12-21)", "1.80").is_err());
        assert!(check_rustc_version("unknown", "1.80").is_err());
        assert!(check_rustc_version("rustc 1.82.0", "latest").is_err());
    }

    #[test]
    fn test_unreachable_store_fails_only_store_checks() {
        let temp = TempDir::new().unwrap();
        let verifier = ReadinessVerifier::new(settings(&temp)).with_model_loader(mock_loader(32));

        let report = verifier.verify();

        assert_eq!(report.checks.len(), 6);
        let names: Vec<_> = report.checks.iter().map(|c| c.name).collect();
        assert_eq!(names[0], "Rust toolchain");
        assert_eq!(names[5], "Embedding model");

        assert!(report.check("Rust toolchain").unwrap().passed);
        assert!(report.check("Model cache").unwrap().passed);
        assert!(report.check("Configuration").unwrap().passed);
        assert!(!report.check("Store ping").unwrap().passed);
        assert!(!report.check("Collection access").unwrap().passed);
        assert!(report.check("Embedding model").unwrap().passed);
        assert_eq!(report.passed_count(), 4);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_all_pass_with_seeded_store() {
        let temp = TempDir::new().unwrap();
        let settings = settings(&temp);
        {
            let location = StoreLocation::from_settings(&settings.store).unwrap();
            Storage::connect(&location).unwrap();
        }

        let report = ReadinessVerifier::new(settings)
            .with_model_loader(mock_loader(32))
            .verify();
        assert!(report.all_passed(), "{:?}", report.checks);
        assert!(report
            .check("Collection access")
            .unwrap()
            .detail
            .contains("(0 docs)"));
    }

    #[test]
    fn test_model_dimension_mismatch_fails_check() {
        let temp = TempDir::new().unwrap();
        let report = ReadinessVerifier::new(settings(&temp))
            .with_model_loader(mock_loader(16))
            .verify();

        let model = report.check("Embedding model").unwrap();
        assert!(!model.passed);
        assert_eq!(model.detail, "Expected 32 dims, got 16");
    }

    #[test]
    fn test_model_unavailable_fails_check() {
        let temp = TempDir::new().unwrap();
        let report = ReadinessVerifier::new(settings(&temp))
            .with_model_loader(|model: &ModelSettings| {
                Err(EmbeddingError::unavailable(&model.identifier, "not found"))
            })
            .verify();

        let model = report.check("Embedding model").unwrap();
        assert!(!model.passed);
        assert!(model.detail.contains("Model unavailable"));
    }

    #[test]
    fn test_blank_setting_fails_configuration() {
        let temp = TempDir::new().unwrap();
        let mut settings = settings(&temp);
        settings.store.vector_index = String::new();

        let report = ReadinessVerifier::new(settings)
            .with_model_loader(mock_loader(32))
            .verify();
        let config = report.check("Configuration").unwrap();
        assert!(!config.passed);
        assert_eq!(config.detail, "Missing settings: store.vector_index");
    }
}
