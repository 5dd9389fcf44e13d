// Beverage pricer - main.rs
// Reads one survey response as JSON and prints the predicted price range

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process::exit;

use beverage_pricer::{load_config, log_sink, predictor, SurveyResponse};

#[derive(Parser, Debug)]
#[command(name = "beverage-pricer", version, about = "Predict a beverage price range from a survey response")]
struct Args {
    /// JSON survey response; read from stdin when omitted
    input: Option<PathBuf>,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading survey response from {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading survey response from stdin")?;
            Ok(buffer)
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config().context("loading configuration")?;
    log_sink::init(&config.log_level)?;

    let predictor = predictor::init(&config).context("loading model artifact")?;
    tracing::info!(model = predictor.classifier_name(), "Predictor ready");

    let response = SurveyResponse::from_json(&read_input(args.input.as_ref())?)?;
    let range = predictor.predict(&response)?;

    println!("{range}");
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        exit(1);
    }
}
