//! Boundary to the remote transcription service.
//!
//! The service itself is reached through [`AnalysisService`]; this module only
//! owns the upload, wait-until-ready and analyse sequence.

use crate::error::{Result, TranscueError};

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the service should treat sensitive terms. Passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfanityMode {
    #[default]
    Verbatim,
    Mask,
    Beep,
}

impl fmt::Display for ProfanityMode {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ProfanityMode::Verbatim => "verbatim",
            ProfanityMode::Mask => "mask",
            ProfanityMode::Beep => "beep",
        };
        write!(fmt, "{}", name)
    }
}

impl FromStr for ProfanityMode {
    type Err = TranscueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbatim" => Ok(ProfanityMode::Verbatim),
            "mask" => Ok(ProfanityMode::Mask),
            "beep" => Ok(ProfanityMode::Beep),
            _ => Err(TranscueError::UnknownProfanityMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub profanity_mode: ProfanityMode,
    pub target_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetState {
    Processing,
    Active,
    Failed(String),
}

pub trait AnalysisService {
    /// Uploads the media and returns the id the service assigned to it.
    fn upload(&mut self, media: &Path) -> Result<String>;

    fn asset_state(&mut self, asset: &str) -> Result<AssetState>;

    /// Runs the analysis on a ready asset and returns the transcript text.
    fn analyse(&mut self, asset: &str, request: &AnalysisRequest) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 150,
        }
    }
}

/// Polls the asset on a fixed interval until the service reports it ready.
///
/// A `Failed` state ends the wait immediately. Setting `cancel` abandons the
/// loop before the next status check; nothing is rolled back. With
/// `max_attempts` at zero no status check is made and the wait fails with
/// `PollExhausted` straight away.
pub fn wait_until_active<S: AnalysisService + ?Sized>(
    service: &mut S,
    asset: &str,
    config: &PollConfig,
    cancel: &AtomicBool,
) -> Result<()> {
    for attempt in 1..=config.max_attempts {
        if cancel.load(Ordering::Relaxed) {
            log::info!("Stopped waiting for asset {}", asset);
            return Err(TranscueError::Cancelled);
        }
        match service.asset_state(asset)? {
            AssetState::Active => {
                log::debug!("Asset {} ready after {} checks", asset, attempt);
                return Ok(());
            }
            AssetState::Failed(reason) => {
                return Err(TranscueError::AssetFailed {
                    asset: asset.to_string(),
                    reason,
                });
            }
            AssetState::Processing => {
                log::trace!("Asset {} still processing (check {})", asset, attempt);
                if attempt < config.max_attempts {
                    thread::sleep(config.interval);
                }
            }
        }
    }
    Err(TranscueError::PollExhausted {
        asset: asset.to_string(),
        attempts: config.max_attempts,
    })
}

/// Uploads `media`, waits for it to become ready and returns the transcript
/// the service produced for it.
pub fn transcribe<S: AnalysisService + ?Sized>(
    service: &mut S,
    media: &Path,
    request: &AnalysisRequest,
    config: &PollConfig,
    cancel: &AtomicBool,
) -> Result<String> {
    let asset = service.upload(media)?;
    log::info!("Uploaded {} as {}", media.display(), asset);
    wait_until_active(service, &asset, config, cancel)?;
    if cancel.load(Ordering::Relaxed) {
        return Err(TranscueError::Cancelled);
    }
    log::info!(
        "Requesting analysis of {} (profanity: {})",
        asset,
        request.profanity_mode
    );
    service.analyse(&asset, request)
}
