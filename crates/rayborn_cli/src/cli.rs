use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rayborn")]
#[command(about = "Render a JSON scene to a PNG with a CPU path tracer")]
pub struct Args {
    /// Scene description to render
    #[arg(default_value = "scene.json")]
    pub scene: PathBuf,

    /// Test every object linearly instead of building a BVH
    #[arg(long)]
    pub no_bvh: bool,

    /// Render on the calling thread only
    #[arg(long)]
    pub no_mt: bool,

    /// Output PNG path (default: named after the enabled optimizations)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the scene's image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the scene's samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Number of render threads (default: available cores)
    #[arg(long, short = 't')]
    pub threads: Option<usize>,

    /// Seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Output path given on the command line, or one that records which
    /// optimizations were active.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(default_output_name(!self.no_bvh, !self.no_mt)),
        }
    }
}

pub fn default_output_name(use_bvh: bool, use_parallel: bool) -> &'static str {
    match (use_bvh, use_parallel) {
        (true, true) => "render_bvh_mt.png",
        (true, false) => "render_bvh_st.png",
        (false, true) => "render_nobvh_mt.png",
        (false, false) => "render_nobvh_st.png",
    }
}
