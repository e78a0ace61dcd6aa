mod cli;
mod commands;
mod format;
mod infra;
mod routes;
mod server;

use build_cost::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
