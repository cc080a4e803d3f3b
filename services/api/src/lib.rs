mod cli;
mod infra;
mod quiz;
mod render;
mod routes;
mod server;

use credit_odds::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
