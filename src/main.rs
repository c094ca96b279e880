use entropy_rs::config::SourceConfig;
use entropy_rs::fill::fill_vec;
use log::{debug, error};
use std::env;
use std::error::Error;
use std::process;

const DEFAULT_COUNT: usize = 32;

/// Prints COUNT bytes from the source selected by `ENTROPY_SOURCE`, as hex.
fn run() -> Result<(), Box<dyn Error>> {
    let count = match env::args().nth(1) {
        Some(arg) => arg.parse::<usize>()?,
        None => DEFAULT_COUNT,
    };

    let config = SourceConfig::from_env()?;
    let mut source = config.build()?;

    let bytes = fill_vec(&mut source, count)?;
    debug!("Generated {} bytes", bytes.len());

    println!("{}", hex::encode(bytes));

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
