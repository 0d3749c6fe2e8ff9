//! Pipeline execution implementation.

use crate::core::codec::{check_input, check_same_format, ImageDecoder};
use crate::core::comparator::{CompareConfig, Comparator, ComparisonResult, Tolerance};
use crate::core::raster::{PixelMode, Raster};
use crate::core::render::CombinedStyle;
use crate::core::reporter::{export_json, export_text};
use crate::core::store::{
    FileSystemStore, OutputStore, COMBINED_DIFF_NAME, DEFAULT_OUTPUT_DIR, FIRST_DIFF_NAME,
    JSON_REPORT_NAME, REPORT_NAME, SECOND_DIFF_NAME,
};
use crate::error::{PixelDiffError, WriteError};
use crate::events::{
    null_sender, DecodeEvent, Event, EventSender, OutputEvent, PipelineEvent, PipelinePhase,
    PipelineSummary,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Pixel statistics
    pub comparison: ComparisonResult,
    /// Shared dimensions of both inputs
    pub dimensions: (u32, u32),
    /// Shared pixel mode of both inputs
    pub mode: PixelMode,
    /// Where each output ended up, in write order
    pub artifacts: Vec<PathBuf>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// First input image
    pub first: PathBuf,
    /// Second input image
    pub second: PathBuf,
    /// Comparison settings
    pub compare: CompareConfig,
    /// Directory the default store writes into
    pub output_dir: PathBuf,
    /// Also write `comparison_report.json`
    pub json_report: bool,
}

impl PipelineConfig {
    fn new(first: PathBuf, second: PathBuf) -> Self {
        Self {
            first,
            second,
            compare: CompareConfig::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            json_report: false,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    store: Option<Box<dyn OutputStore>>,
}

impl PipelineBuilder {
    /// Create a builder comparing `first` against `second`
    pub fn new(first: impl Into<PathBuf>, second: impl Into<PathBuf>) -> Self {
        Self {
            config: PipelineConfig::new(first.into(), second.into()),
            store: None,
        }
    }

    /// Replace all comparison settings at once
    pub fn compare_config(mut self, config: CompareConfig) -> Self {
        self.config.compare = config;
        self
    }

    /// Set the per-channel tolerance
    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.config.compare.tolerance = tolerance;
        self
    }

    /// Set how the combined image is drawn
    pub fn combined_style(mut self, style: CombinedStyle) -> Self {
        self.config.compare.combined_style = style;
        self
    }

    /// Refuse inputs of different container formats
    pub fn strict_format(mut self, strict: bool) -> Self {
        self.config.compare.strict_format = strict;
        self
    }

    /// Set the output directory (ignored when a custom store is set)
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Also write the JSON report
    pub fn json_report(mut self, enabled: bool) -> Self {
        self.config.json_report = enabled;
        self
    }

    /// Set the output store
    pub fn store(mut self, store: Box<dyn OutputStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        let store = match self.store {
            Some(store) => store,
            None => Box::new(FileSystemStore::new(self.config.output_dir.clone())),
        };

        Pipeline {
            config: self.config,
            store,
        }
    }
}

/// Decode, compare and persist one pair of images
pub struct Pipeline {
    config: PipelineConfig,
    store: Box<dyn OutputStore>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder(first: impl Into<PathBuf>, second: impl Into<PathBuf>) -> PipelineBuilder {
        PipelineBuilder::new(first, second)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult, PixelDiffError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    ///
    /// Outputs are only written once both inputs decoded and proved
    /// compatible, so a failed run leaves the store untouched.
    pub fn run_with_events(&self, events: &EventSender) -> Result<PipelineResult, PixelDiffError> {
        events.send(Event::Pipeline(PipelineEvent::Started));

        let result = self.execute(events);
        if let Err(e) = &result {
            warn!(error = %e, "comparison failed");
            events.send(Event::Pipeline(PipelineEvent::Error {
                message: e.to_string(),
            }));
        }
        result
    }

    fn execute(&self, events: &EventSender) -> Result<PipelineResult, PixelDiffError> {
        let start_time = Instant::now();
        let config = &self.config;

        // Phase 1: Decoding
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Decoding,
        }));

        check_input(&config.first)?;
        check_input(&config.second)?;
        if config.compare.strict_format {
            check_same_format(&config.first, &config.second)?;
        }

        let first = decode(&config.first, events)?;
        let second = decode(&config.second, events)?;

        // Phase 2: Comparing
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Comparing,
        }));

        let comparator = Comparator::new(config.compare.clone());
        let comparison = comparator.compare(&first, &second)?;

        // Phase 3: Writing
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Writing,
        }));

        let images = &comparison.images;
        let mut artifacts = Vec::with_capacity(5);
        for (name, raster) in [
            (FIRST_DIFF_NAME, &images.first),
            (SECOND_DIFF_NAME, &images.second),
            (COMBINED_DIFF_NAME, &images.combined),
        ] {
            let path = self.store.write_image(name, raster)?;
            artifacts.push(self.written(path, events));
        }

        let report = render_report(REPORT_NAME, |buf| export_text(&comparison.result, buf))?;
        let path = self.store.write_text(REPORT_NAME, &report)?;
        artifacts.push(self.written(path, events));

        if config.json_report {
            let json =
                render_report(JSON_REPORT_NAME, |buf| export_json(&comparison.result, buf))?;
            let path = self.store.write_text(JSON_REPORT_NAME, &json)?;
            artifacts.push(self.written(path, events));
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let result = comparison.result;

        info!(
            differing = result.differing_pixels,
            total = result.total_pixels,
            percent = result.percent_different,
            destination = %self.store.describe(),
            duration_ms,
            "comparison complete"
        );

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_pixels: result.total_pixels,
                differing_pixels: result.differing_pixels,
                percent_different: result.percent_different,
                artifacts_written: artifacts.len(),
                duration_ms,
            },
        }));

        Ok(PipelineResult {
            comparison: result,
            dimensions: comparison.mask.dimensions(),
            mode: images.first.mode(),
            artifacts,
            duration_ms,
        })
    }

    fn written(&self, path: PathBuf, events: &EventSender) -> PathBuf {
        events.send(Event::Output(OutputEvent::ArtifactWritten { path: path.clone() }));
        path
    }
}

/// Run a report exporter into memory so any store can persist it
fn render_report<F>(name: &str, export: F) -> Result<String, WriteError>
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let encode_error = |reason: String| WriteError::Encode {
        path: PathBuf::from(name),
        reason,
    };

    let mut buffer = Vec::new();
    export(&mut buffer).map_err(|e| encode_error(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| encode_error(e.to_string()))
}

fn decode(path: &Path, events: &EventSender) -> Result<Raster, PixelDiffError> {
    events.send(Event::Decode(DecodeEvent::Started {
        path: path.to_path_buf(),
    }));

    let raster = ImageDecoder::decode(path)?;

    events.send(Event::Decode(DecodeEvent::Decoded {
        path: path.to_path_buf(),
        width: raster.width(),
        height: raster.height(),
        mode: raster.mode(),
    }));
    Ok(raster)
}
