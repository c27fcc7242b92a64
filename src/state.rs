//! Presentation state: the analysis lifecycle, the selected result tab and
//! the thumbnail generator.

use log::{error, warn};
use std::fmt;

use crate::error::{AnalyzerError, Result, GENERIC_ERROR_MESSAGE};
use crate::model::AnalysisResult;

/// Lifecycle of one analysis.
///
/// The result lives inside `Success`, so a success without a result cannot
/// be represented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Idle,
    Analyzing,
    Success(AnalysisResult),
    /// Carries only the user-facing message
    Error(String),
}

impl AppState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, AppState::Analyzing)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AppState::Success(result) => Some(result),
            _ => None,
        }
    }
}

/// Result tab shown after a successful analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Recipe,
    Strategy,
    Thumbnail,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tab::Recipe => "Recipe & Steps",
            Tab::Strategy => "Viral Strategy",
            Tab::Thumbnail => "Thumbnail",
        };
        f.write_str(label)
    }
}

/// Single-user session holding the current state and selected tab.
#[derive(Debug, Default)]
pub struct Session {
    state: AppState,
    active_tab: Tab,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Start an analysis. Refused while another one is in flight.
    ///
    /// Starting from `Success` or `Error` discards the previous outcome.
    pub fn begin(&mut self) -> Result<()> {
        if self.state.is_analyzing() {
            return Err(AnalyzerError::Busy);
        }
        self.state = AppState::Analyzing;
        Ok(())
    }

    /// Record the outcome of the in-flight analysis.
    pub fn settle(&mut self, outcome: Result<AnalysisResult>) {
        if !self.state.is_analyzing() {
            warn!("Ignoring analysis outcome: no analysis in progress");
            return;
        }

        self.state = match outcome {
            Ok(result) => {
                self.active_tab = Tab::Recipe;
                AppState::Success(result)
            }
            Err(e) => {
                error!("{}", e);
                AppState::Error(GENERIC_ERROR_MESSAGE.to_string())
            }
        };
    }

    /// Return to `Idle`, dropping any result.
    pub fn reset(&mut self) {
        if self.state.is_analyzing() {
            warn!("Ignoring reset: analysis in progress");
            return;
        }
        self.state = AppState::Idle;
        self.active_tab = Tab::Recipe;
    }
}

/// Thumbnail generator state, independent of the analysis lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThumbnailState {
    #[default]
    Empty,
    Generating,
    /// Generated image as a `data:` URL
    Ready(String),
    Failed(String),
}

/// Message shown when thumbnail generation fails.
pub const THUMBNAIL_ERROR_MESSAGE: &str = "Failed to generate thumbnail. Please try again.";

impl ThumbnailState {
    /// Start (or restart) generation. Refused while already generating.
    pub fn begin(&mut self) -> Result<()> {
        if *self == ThumbnailState::Generating {
            return Err(AnalyzerError::Busy);
        }
        *self = ThumbnailState::Generating;
        Ok(())
    }

    pub fn settle(&mut self, outcome: Result<String>) {
        if *self != ThumbnailState::Generating {
            warn!("Ignoring thumbnail outcome: no generation in progress");
            return;
        }
        *self = match outcome {
            Ok(data_url) => ThumbnailState::Ready(data_url),
            Err(e) => {
                error!("{}", e);
                ThumbnailState::Failed(THUMBNAIL_ERROR_MESSAGE.to_string())
            }
        };
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            ThumbnailState::Ready(url) => Some(url),
            _ => None,
        }
    }
}
