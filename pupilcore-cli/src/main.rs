use clap::Parser;
use pupilcore::io::{load_edge_map, load_gray_image};
use pupilcore::{
    coarse_locate_detailed, CoarseConfig, CoarseObserver, ConfidenceConfig, ConfidenceReport,
    Pupil, Rect, RegionCandidate,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Pupilcore CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
struct PupilJson {
    cx: f32,
    cy: f32,
    width: f32,
    height: f32,
    #[serde(default)]
    angle_deg: f32,
}

impl From<&PupilJson> for Pupil {
    fn from(value: &PupilJson) -> Self {
        Pupil::new(value.cx, value.cy, value.width, value.height, value.angle_deg)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CoarseConfigJson {
    min_coverage: f32,
    working_width: usize,
    working_height: usize,
    parallel: bool,
}

impl Default for CoarseConfigJson {
    fn default() -> Self {
        let cfg = CoarseConfig::default();
        Self {
            min_coverage: cfg.min_coverage,
            working_width: cfg.working_width,
            working_height: cfg.working_height,
            parallel: cfg.parallel,
        }
    }
}

impl From<&CoarseConfigJson> for CoarseConfig {
    fn from(value: &CoarseConfigJson) -> Self {
        Self {
            min_coverage: value.min_coverage,
            working_width: value.working_width,
            working_height: value.working_height,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfidenceConfigJson {
    contrast_bias: f32,
    edge_band: usize,
    parallel: bool,
}

impl Default for ConfidenceConfigJson {
    fn default() -> Self {
        let cfg = ConfidenceConfig::default();
        Self {
            contrast_bias: cfg.contrast_bias,
            edge_band: cfg.edge_band,
            parallel: cfg.parallel,
        }
    }
}

impl From<&ConfidenceConfigJson> for ConfidenceConfig {
    fn from(value: &ConfidenceConfigJson) -> Self {
        Self {
            contrast_bias: value.contrast_bias,
            edge_band: value.edge_band,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    edge_path: Option<String>,
    edge_threshold: u8,
    output_path: Option<String>,
    pupil: Option<PupilJson>,
    coarse: CoarseConfigJson,
    confidence: ConfidenceConfigJson,
}

#[derive(Debug, Serialize)]
struct RectRecord {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl From<Rect> for RectRecord {
    fn from(value: Rect) -> Self {
        Self {
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
        }
    }
}

#[derive(Debug, Serialize)]
struct CandidateRecord {
    x: usize,
    y: usize,
    radius: usize,
    response: f32,
}

impl From<&RegionCandidate> for CandidateRecord {
    fn from(value: &RegionCandidate) -> Self {
        Self {
            x: value.x,
            y: value.y,
            radius: value.radius,
            response: value.response,
        }
    }
}

/// Keeps the candidates unioned into the ROI, in working coordinates.
#[derive(Default)]
struct MergedCandidates(Vec<CandidateRecord>);

impl CoarseObserver for MergedCandidates {
    fn on_merge(&mut self, candidate: &RegionCandidate) {
        self.0.push(candidate.into());
    }
}

#[derive(Debug, Serialize)]
struct CoarseRecord {
    roi: RectRecord,
    fallback: bool,
    scale: f32,
    working_size: [usize; 2],
    candidates: usize,
    best_response: Option<f32>,
    merged: Vec<CandidateRecord>,
}

#[derive(Debug, Serialize)]
struct ConfidenceRecord {
    outline_contrast: Option<f32>,
    angular_spread: Option<f32>,
    aspect_ratio: Option<f32>,
    edge_ratio: Option<f32>,
    edge_points: usize,
}

impl From<ConfidenceReport> for ConfidenceRecord {
    fn from(value: ConfidenceReport) -> Self {
        Self {
            outline_contrast: value.outline_contrast,
            angular_spread: value.angular_spread,
            aspect_ratio: value.aspect_ratio,
            edge_ratio: value.edge_ratio,
            edge_points: value.edge_points.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    coarse: CoarseRecord,
    confidence: Option<ConfidenceRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("pupilcore=debug".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }
    let coarse_cfg = CoarseConfig::from(&config.coarse);
    let confidence_cfg = ConfidenceConfig::from(&config.confidence);
    coarse_cfg.validate()?;
    confidence_cfg.validate()?;

    let frame = load_gray_image(&config.image_path)?;
    let edges = config
        .edge_path
        .as_ref()
        .map(|path| load_edge_map(path, config.edge_threshold))
        .transpose()?;

    let mut merged = MergedCandidates::default();
    let details = coarse_locate_detailed(frame.view(), &coarse_cfg, &mut merged)?;
    let coarse = CoarseRecord {
        roi: details.roi.into(),
        fallback: details.fallback,
        scale: details.scale,
        working_size: [details.working_size.0, details.working_size.1],
        candidates: details.candidates,
        best_response: details.best_response,
        merged: merged.0,
    };

    let confidence = match &config.pupil {
        Some(pupil) => {
            let report = ConfidenceReport::evaluate(
                frame.view(),
                edges.as_ref().map(|edges| edges.view()),
                &Pupil::from(pupil),
                &confidence_cfg,
            )?;
            Some(report.into())
        }
        None => None,
    };

    let output = Output { coarse, confidence };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
