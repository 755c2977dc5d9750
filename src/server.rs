use std::str::FromStr;
use std::sync::Arc;
use std::thread;

use actix_web::dev::Service;
use actix_web::error::InternalError;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Result;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tokio::runtime::Runtime;

use crate::coord_transform::CoordSystem;
use crate::error::TrajectoryError;
use crate::generator::{TrajectoryGenerator, TrajectoryRequest};

/// Query string of `GET /trajectory` and body of `POST /trajectory`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TrajectoryParams {
    pub fence: Option<String>,
    pub num_points: Option<usize>,
    pub total_distance: Option<u64>,
    pub error_margin: Option<f64>,
    pub coord_system: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TrajectoryResponse {
    pub trajectory: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: u16, message: String) -> HttpResponse {
    let body = ErrorResponse { error: message };
    match status {
        400 => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

pub const MISSING_FENCE: &str = "Fence parameter is required";

// Extractor failures get the same JSON body as every other 400.
fn bad_params<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = error_response(400, format!("invalid parameters: {err}"));
    InternalError::from_response(err, response).into()
}

impl TrajectoryParams {
    fn into_request(
        self,
        fence: String,
        generator: &TrajectoryGenerator,
    ) -> Result<TrajectoryRequest, TrajectoryError> {
        let mut request = generator.request(fence);
        if let Some(num_points) = self.num_points {
            request.num_points = num_points;
        }
        if let Some(total_distance) = self.total_distance {
            request.total_distance = total_distance;
        }
        if let Some(error_margin) = self.error_margin {
            request.error_margin = error_margin;
        }
        if let Some(coord_system) = self.coord_system {
            request.coord_system = CoordSystem::from_str(&coord_system).map_err(|_| {
                TrajectoryError::Parse(format!(
                    "unknown coord_system `{coord_system}`, expected one of {}",
                    CoordSystem::iter().join(", ")
                ))
            })?;
        }
        Ok(request)
    }
}

struct AppState {
    generator: Arc<TrajectoryGenerator>,
}

async fn handle(mut params: TrajectoryParams, data: web::Data<AppState>) -> HttpResponse {
    let Some(fence) = params.fence.take().filter(|f| !f.trim().is_empty()) else {
        return error_response(400, MISSING_FENCE.to_owned());
    };
    let request = match params.into_request(fence, &data.generator) {
        Ok(request) => request,
        Err(e) => return error_response(e.status_code(), e.to_string()),
    };

    let generator = data.generator.clone();
    let result =
        web::block(move || generator.generate_string(&request, &mut rand::rng())).await;
    match result {
        Ok(Ok(trajectory)) => HttpResponse::Ok().json(TrajectoryResponse { trajectory }),
        Ok(Err(e)) => {
            warn!("trajectory generation failed: {e}");
            error_response(e.status_code(), e.to_string())
        }
        Err(e) => error_response(500, e.to_string()),
    }
}

async fn get_trajectory(
    params: web::Query<TrajectoryParams>,
    data: web::Data<AppState>,
) -> HttpResponse {
    handle(params.into_inner(), data).await
}

async fn post_trajectory(
    params: web::Json<TrajectoryParams>,
    data: web::Data<AppState>,
) -> HttpResponse {
    handle(params.into_inner(), data).await
}

/// Registers `/trajectory` on an actix `App`.
pub fn configure(generator: Arc<TrajectoryGenerator>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(AppState { generator }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_params(err)))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| bad_params(err)))
            .route("/trajectory", web::get().to(get_trajectory))
            .route("/trajectory", web::post().to(post_trajectory));
    }
}

pub struct TrajectoryServer {
    host: String,
    port: u16,
    generator: Arc<TrajectoryGenerator>,
    handle: Option<thread::JoinHandle<()>>,
}

impl TrajectoryServer {
    pub fn new(host: &str, port: u16, generator: TrajectoryGenerator) -> Self {
        Self {
            host: host.into(),
            port,
            generator: Arc::new(generator),
            handle: None,
        }
    }

    /// Actual port once started; differs from the configured one when that
    /// was 0.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}/trajectory", self.host, self.port)
    }

    // Start the server in a separate thread
    pub fn start(&mut self) -> Result<()> {
        let host = self.host.clone();
        let port = self.port;
        let generator = self.generator.clone();

        // reports the bound port, or why binding failed
        let (tx, rx) = std::sync::mpsc::channel::<Result<u16, String>>();

        let handle = thread::spawn(move || {
            let runtime = match Runtime::new() {
                Ok(runtime) => runtime,
                Err(e) => {
                    let _ = tx.send(Err(format!("failed to create tokio runtime: {e}")));
                    return;
                }
            };
            runtime.block_on(async move {
                let server = HttpServer::new(move || {
                    App::new()
                        .wrap_fn(|req, srv| {
                            info!("Incoming request: {} {}", req.method(), req.uri());
                            srv.call(req)
                        })
                        .configure(configure(generator.clone()))
                })
                .bind((host.as_str(), port));
                let server = match server {
                    Ok(server) => server,
                    Err(e) => {
                        let _ = tx.send(Err(format!("failed to bind {host}:{port}: {e}")));
                        return;
                    }
                };

                let actual_port = server
                    .addrs()
                    .first()
                    .map(|addr| addr.port())
                    .unwrap_or(port);
                let _ = tx.send(Ok(actual_port));

                info!("Server bound successfully to {}:{}", host, actual_port);
                if let Err(e) = server.run().await {
                    error!("server stopped: {e}");
                }
            });
        });

        self.port = rx
            .recv()
            .map_err(|_| anyhow!("server thread exited before binding"))?
            .map_err(|e| anyhow!(e))?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Blocks until the server thread exits.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("server thread panicked");
            }
        }
    }
}
