use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::resampler::JitterPolicy;
use crate::utils::METERS_PER_DEGREE;

/// Defaults for a single generation request. Request fields override the
/// first three.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub num_points: usize,
    /// requests asking for more points are rejected
    pub max_num_points: usize,
    /// meters
    pub total_distance: u64,
    /// degrees, per axis
    pub error_margin: f64,
    /// meters; shorter routes are not worth following
    pub min_route_distance: f64,
    /// degrees the fence grows by before asking for roads
    pub road_buffer_distance: f64,
    pub meters_per_degree: f64,
    pub jitter: JitterPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_points: 100,
            max_num_points: 10_000,
            total_distance: 50000,
            error_margin: 0.00003,
            min_route_distance: 10.0,
            road_buffer_distance: 0.000001,
            meters_per_degree: METERS_PER_DEGREE,
            jitter: JitterPolicy::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// GeoJSON road centerlines; without it every trajectory follows the
    /// fence's medial axis.
    pub road_network: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub generator: GeneratorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5005,
            road_network: None,
            log_dir: None,
            log_level: LevelFilter::Info,
            generator: GeneratorConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = ServerConfig::default();
        if let Some(host) = get("TRAJECTORY_HOST") {
            config.host = host;
        }
        if let Some(port) = get("TRAJECTORY_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid TRAJECTORY_PORT: {port}"))?;
        }
        config.road_network = get("TRAJECTORY_ROAD_NETWORK").map(PathBuf::from);
        config.log_dir = get("TRAJECTORY_LOG_DIR").map(PathBuf::from);
        if let Some(level) = get("TRAJECTORY_LOG_LEVEL") {
            config.log_level = LevelFilter::from_str(&level)
                .map_err(|_| anyhow!("invalid TRAJECTORY_LOG_LEVEL: {level}"))?;
        }
        if let Some(generator) = get("TRAJECTORY_GENERATOR_CONFIG") {
            config.generator = serde_json::from_str(&generator)
                .context("invalid TRAJECTORY_GENERATOR_CONFIG")?;
        }
        Ok(config)
    }
}
