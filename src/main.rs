use std::process::ExitCode;
use studentdb::config;
use studentdb::core::db::with_database;
use studentdb::core::Result;
use studentdb::report::Report;
use tracing::{error, info};

fn run() -> Result<()> {
    let config = config::discover_config()?;

    // Optional single argument: the database file
    let args: Vec<String> = std::env::args().collect();
    let db_path = config.db_path(args.get(1).map(String::as_str));
    let format = config.output_format();

    info!("Using database {:?}", db_path);
    let output = with_database(&db_path, config.connect_options(), |db| {
        let outcome = db.ensure_initialized()?;
        Report::collect(db, outcome)?.render(format)
    })?;

    println!("{}", output);
    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
