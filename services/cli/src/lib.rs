mod cli;
mod commands;
mod infra;

use urr24::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
