#[macro_use]
extern crate log;

use anyhow::Result;
use trajectory_builder::config::ServerConfig;
use trajectory_builder::generator::TrajectoryGenerator;
use trajectory_builder::logs;
use trajectory_builder::road_network::{GeoJsonRoadNetwork, NoRoadNetwork};
use trajectory_builder::server::TrajectoryServer;

fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    logs::init(config.log_dir.as_deref(), config.log_level)?;

    let generator = match &config.road_network {
        Some(path) => TrajectoryGenerator::new(
            config.generator.clone(),
            GeoJsonRoadNetwork::load(path)?,
        ),
        None => {
            warn!("TRAJECTORY_ROAD_NETWORK is not set, trajectories will follow fence centerlines");
            TrajectoryGenerator::new(config.generator.clone(), NoRoadNetwork)
        }
    };

    let mut server = TrajectoryServer::new(&config.host, config.port, generator);
    server.start()?;
    info!("serving on {}", server.url());
    server.join();
    Ok(())
}
