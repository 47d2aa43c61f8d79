//! Application state and server settings.

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use seoscope_core::{Analyzer, RenderConfig, ReportRenderer};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub output_dir: PathBuf,
    pub secret_key: String,
    /// How long a written report stays downloadable.
    pub report_ttl: Duration,
}

/// Reports older than this are swept unless `SEOSCOPE_REPORT_TTL_SECS` says otherwise.
pub const DEFAULT_REPORT_TTL: Duration = Duration::from_secs(60 * 60);

impl ServerConfig {
    pub const ADDR_VAR: &'static str = "SEOSCOPE_ADDR";
    pub const OUTPUT_DIR_VAR: &'static str = "SEOSCOPE_OUTPUT_DIR";
    pub const SECRET_KEY_VAR: &'static str = "SEOSCOPE_SECRET_KEY";
    pub const REPORT_TTL_VAR: &'static str = "SEOSCOPE_REPORT_TTL_SECS";

    /// Reads `SEOSCOPE_ADDR`, `SEOSCOPE_OUTPUT_DIR`, `SEOSCOPE_SECRET_KEY`
    /// and `SEOSCOPE_REPORT_TTL_SECS`.
    ///
    /// A missing secret is replaced by a random key for this process only,
    /// so download links stop working after a restart.
    pub fn from_env() -> anyhow::Result<Self> {
        let addr = std::env::var(Self::ADDR_VAR)
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", Self::ADDR_VAR, e))?;

        let output_dir = std::env::var(Self::OUTPUT_DIR_VAR).map_or_else(|_| PathBuf::from("output"), PathBuf::from);

        let secret_key = match std::env::var(Self::SECRET_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::warn!("{} is not set; using a random key for this process", Self::SECRET_KEY_VAR);
                random_key()
            }
        };

        let report_ttl = match std::env::var(Self::REPORT_TTL_VAR) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| anyhow::anyhow!("invalid {}: {}", Self::REPORT_TTL_VAR, e))?,
            Err(_) => DEFAULT_REPORT_TTL,
        };

        Ok(Self { addr, output_dir, secret_key, report_ttl })
    }
}

fn random_key() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub renderer: Arc<ReportRenderer>,
    pub output_dir: Arc<PathBuf>,
    pub report_ttl: Duration,
    secret_key: Arc<String>,
}

impl AppState {
    /// State whose renderer previews as many characters as the analyzer does.
    pub fn new(analyzer: Analyzer, output_dir: PathBuf, secret_key: String) -> Self {
        let renderer = ReportRenderer::new(RenderConfig::from(&analyzer.config().thresholds));
        Self {
            analyzer: Arc::new(analyzer),
            renderer: Arc::new(renderer),
            output_dir: Arc::new(output_dir),
            report_ttl: DEFAULT_REPORT_TTL,
            secret_key: Arc::new(secret_key),
        }
    }

    pub fn with_report_ttl(mut self, ttl: Duration) -> Self {
        self.report_ttl = ttl;
        self
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(Analyzer::default(), config.output_dir.clone(), config.secret_key.clone())
            .with_report_ttl(config.report_ttl)
    }

    /// Where the report with this id lives on disk.
    pub fn report_path(&self, id: &Uuid) -> PathBuf {
        self.output_dir.join(format!("{}.pdf", id))
    }

    /// Hex SHA-256 of the secret key followed by the report id.
    pub fn sign(&self, id: &Uuid) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret_key.as_bytes());
        hasher.update(id.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn verify(&self, id: &Uuid, signature: &str) -> bool {
        let expected = self.sign(id);
        expected.len() == signature.len()
            && expected.bytes().zip(signature.bytes()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
    }

    /// Relative link that downloads the report with this id.
    pub fn download_link(&self, id: &Uuid) -> String {
        format!("/download/{}?sig={}", id, self.sign(id))
    }

    /// Deletes reports last modified more than `report_ttl` ago.
    ///
    /// Only `<uuid>.pdf` files are considered; anything else in the output
    /// directory is left alone. Returns how many reports were removed.
    pub fn sweep_reports(&self) -> std::io::Result<usize> {
        let entries = match std::fs::read_dir(self.output_dir.as_path()) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err),
        };

        let now = SystemTime::now();
        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if !is_report_file(&path) {
                continue;
            }
            let Ok(modified) = std::fs::metadata(&path).and_then(|meta| meta.modified()) else {
                continue;
            };
            let expired = now.duration_since(modified).is_ok_and(|age| age > self.report_ttl);
            if expired && remove_report(&path)? {
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!(removed, dir = %self.output_dir.display(), "expired reports removed");
        }
        Ok(removed)
    }
}

fn is_report_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "pdf")
        && path.file_stem().and_then(|stem| stem.to_str()).is_some_and(|stem| Uuid::parse_str(stem).is_ok())
}

/// Removes one report; a file that is already gone is not an error.
fn remove_report(path: &Path) -> std::io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}
