#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod config;
pub mod coord_transform;
pub mod error;
pub mod export_data;
pub mod fence;
pub mod generator;
pub mod logs;
pub mod medial_axis;
pub mod path_trimmer;
pub mod resampler;
pub mod road_network;
pub mod router;
pub mod server;
pub mod trajectory;
pub mod utils;

pub use error::TrajectoryError;
pub use generator::{TrajectoryGenerator, TrajectoryRequest};
pub use trajectory::Trajectory;
