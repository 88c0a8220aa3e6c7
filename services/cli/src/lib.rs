mod cli;
mod commands;

use flight_earn::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
