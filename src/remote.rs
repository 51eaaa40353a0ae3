//! Client for the optional remote scoring service.
//!
//! The service takes `{"message": ...}` on `POST /analyze` and answers with a
//! status label, a 0-100 score and explanation lines, or an `error` field.

use crate::classifier::Verdict;
use crate::config::RemoteConfig;
use crate::engine::{Assessment, AssessmentSource};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const DANGEROUS_SCORE: u8 = 70;
const SUSPICIOUS_SCORE: u8 = 40;

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    message: &'a str,
}

/// Raw response body of the scoring service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sus_score: Option<f64>,
    #[serde(default)]
    pub explanation: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RemoteReport {
    fn clamped_score(&self) -> Option<u8> {
        self.sus_score
            .filter(|s| s.is_finite())
            .map(|s| s.round().clamp(0.0, 100.0) as u8)
    }

    fn status_verdict(&self) -> Option<Verdict> {
        match self.status.as_deref()?.trim().to_lowercase().as_str() {
            "safe" => Some(Verdict::Safe),
            "sus" | "suspicious" => Some(Verdict::Suspicious),
            "dangerous" => Some(Verdict::Dangerous),
            other => {
                log::warn!("Unknown status from scoring service: {}", other);
                None
            }
        }
    }

    /// Map the service answer onto the shared assessment shape.
    ///
    /// The status label wins over the score; anything unusable fails closed.
    pub fn into_assessment(self) -> Assessment {
        if let Some(error) = &self.error {
            return Assessment::fail_closed(error);
        }

        let score = self.clamped_score();
        let verdict = match (self.status_verdict(), score) {
            (Some(verdict), _) => verdict,
            (None, Some(score)) if score >= DANGEROUS_SCORE => Verdict::Dangerous,
            (None, Some(score)) if score >= SUSPICIOUS_SCORE => Verdict::Suspicious,
            (None, Some(_)) => Verdict::Safe,
            (None, None) => {
                return Assessment::fail_closed("Scoring service returned no status or score")
            }
        };

        Assessment {
            verdict,
            score,
            reasons: self.explanation,
            source: AssessmentSource::Remote,
        }
    }
}

/// A configured scorer, or why it could not be built.
pub type ScorerSetup = std::result::Result<RemoteScorer, String>;

pub struct RemoteScorer {
    client: Client,
    endpoint: Url,
}

impl RemoteScorer {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("TrustText/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: analyze_endpoint(&config.base_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn score(&self, text: &str) -> Result<RemoteReport> {
        log::debug!("Sending message to scoring service at {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest { message: text })
            .send()
            .await
            .with_context(|| format!("Failed to reach scoring service at {}", self.endpoint))?;

        // Error bodies still carry the `error` field, so decode regardless of status.
        let status = response.status();
        let report: RemoteReport = response
            .json()
            .await
            .with_context(|| format!("Invalid response from scoring service (HTTP {status})"))?;
        Ok(report)
    }
}

/// Build the scorer for a session. A failure is kept so every later message
/// still gets a fail-closed answer.
pub fn setup_scorer(config: &RemoteConfig) -> ScorerSetup {
    match RemoteScorer::new(config) {
        Ok(scorer) => {
            log::info!("Remote scoring enabled: {}", scorer.endpoint());
            Ok(scorer)
        }
        Err(e) => {
            log::error!("Remote scoring unavailable: {:#}", e);
            Err(format!("{:#}", e))
        }
    }
}

/// Remote assessment for a session, failing closed when the scorer is missing.
pub async fn assess_configured(setup: &ScorerSetup, text: &str) -> Assessment {
    match setup {
        Ok(scorer) => assess_remote(scorer, text).await,
        Err(reason) => Assessment::fail_closed(reason),
    }
}

/// Ask the remote service; any transport or decode failure becomes a
/// fail-closed assessment instead of an error.
pub async fn assess_remote(scorer: &RemoteScorer, text: &str) -> Assessment {
    match scorer.score(text).await {
        Ok(report) => report.into_assessment(),
        Err(e) => {
            log::error!("Remote scoring failed: {:#}", e);
            Assessment::fail_closed(&format!("{:#}", e))
        }
    }
}

fn analyze_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)
        .with_context(|| format!("Invalid scoring service URL: {base_url}"))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("analyze")
        .with_context(|| format!("Invalid scoring service URL: {base_url}"))
}
