//! fig2gerber - Generate PCB fabrication files from XFig drawings
//!
//! Command-line front end: parses the configuration, runs the converter
//! and reports what was produced.

use fig2gerber::{config::Config, converter::Converter, error::Result};
use tracing::{error, info};

fn main() -> Result<()> {
    let config = Config::from_args().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    info!("Starting fig2gerber...");

    let mut converter = Converter::new(config);

    match converter.run() {
        Ok(()) => {
            let stats = converter.stats();
            info!("Produced {} output files", stats.files_produced);
            for output in &stats.outputs {
                info!("  {}", output);
            }
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
