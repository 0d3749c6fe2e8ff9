//! Event type definitions for progress reporting.

use crate::core::raster::PixelMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the comparison pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Input decoding events
    Decode(DecodeEvent),
    /// Output writing events
    Output(OutputEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events while reading the inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DecodeEvent {
    /// An input is about to be decoded
    Started { path: PathBuf },
    /// An input was decoded
    Decoded {
        path: PathBuf,
        width: u32,
        height: u32,
        mode: PixelMode,
    },
}

/// Events while persisting outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputEvent {
    /// A difference image or report was written
    ArtifactWritten { path: PathBuf },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
    /// Pipeline stopped on an error
    Error { message: String },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Decoding,
    Comparing,
    Writing,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Pixels in each image
    pub total_pixels: u64,
    /// Pixels outside tolerance
    pub differing_pixels: u64,
    /// Differing share, 0-100
    pub percent_different: f64,
    /// Number of files written
    pub artifacts_written: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Decoding => write!(f, "Decoding"),
            PipelinePhase::Comparing => write!(f, "Comparing"),
            PipelinePhase::Writing => write!(f, "Writing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Decode(DecodeEvent::Decoded {
            path: PathBuf::from("image1.png"),
            width: 100,
            height: 100,
            mode: PixelMode::Rgb,
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Decode(DecodeEvent::Decoded { width, mode, .. }) => {
                assert_eq!(width, 100);
                assert_eq!(mode, PixelMode::Rgb);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn pipeline_summary_is_serializable() {
        let summary = PipelineSummary {
            total_pixels: 10_000,
            differing_pixels: 200,
            percent_different: 2.0,
            artifacts_written: 4,
            duration_ms: 15,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"differing_pixels\":200"));
    }

    #[test]
    fn phases_display_by_name() {
        assert_eq!(PipelinePhase::Decoding.to_string(), "Decoding");
        assert_eq!(PipelinePhase::Writing.to_string(), "Writing");
    }
}
