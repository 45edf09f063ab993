use std::process::ExitCode;

use clap::Parser;
use signal_timing::SignalNetworkConfig;

mod cli;
mod harness;

use cli::HarnessOptions;

fn load_config(path: Option<&str>) -> Result<SignalNetworkConfig, String> {
    let Some(path) = path else {
        return Ok(SignalNetworkConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}"))?;
    SignalNetworkConfig::from_json(&json).map_err(|e| format!("parsing {path}: {e}"))
}

fn main() -> ExitCode {
    let options = HarnessOptions::parse();

    let config = match load_config(options.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("traffic-signals: {e}");
            return ExitCode::FAILURE;
        }
    };

    match harness::run(options, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("traffic-signals: {e}");
            ExitCode::FAILURE
        }
    }
}
