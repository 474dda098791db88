mod cli;
mod commands;
mod demo;
mod infra;

use talent_radar::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
