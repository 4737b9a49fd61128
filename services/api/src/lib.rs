mod assess;
mod cli;
mod infra;
mod routes;
mod server;

use sme_loan::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
