use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use hamus_core::{Classifier, DenseModel, ExtractorConfig, FeatureExtractor, UrlFeatures};
use owo_colors::OwoColorize;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the scoring report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Score URLs against a pretrained phishing classifier
#[derive(Parser, Debug)]
#[command(name = "hamus")]
#[command(author = "Hamus Contributors")]
#[command(version = VERSION)]
#[command(about = "Extract phishing signals from a URL and score them", long_about = None)]
struct Args {
    /// URL to extract features from and score
    #[arg(value_name = "URL")]
    url: String,

    /// Classifier artifact (JSON); prints the feature vector only when omitted
    #[arg(short, long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Page-rank API token (falls back to HAMUS_OPR_KEY)
    #[arg(long, value_name = "KEY")]
    opr_key: Option<String>,

    /// WHOIS API token (falls back to HAMUS_WHOIS_KEY)
    #[arg(long, value_name = "KEY")]
    whois_key: Option<String>,

    /// Page fetch timeout in seconds
    #[arg(long, default_value = "5", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for the page fetch
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Skip all network lookups; sentinel values stand in
    #[arg(long)]
    offline: bool,

    /// Enable progress logging
    #[arg(short, long)]
    verbose: bool,
}

/// Render the report as an aligned feature table.
fn render_text(url: &str, features: &UrlFeatures, prediction: Option<&[f32]>) -> String {
    let mut out = String::new();
    out.push_str(&format!("url: {}\n\nfeatures:\n", url));

    for (name, value) in UrlFeatures::feature_names().iter().zip(features.as_f32_vec()) {
        out.push_str(&format!("  {:<28}{}\n", name, value));
    }

    if let Some(prediction) = prediction {
        out.push_str(&format!("\nprediction: {:?}\n", prediction));
    }

    out
}

/// Render the report as a JSON document.
fn render_json(url: &str, features: &UrlFeatures, prediction: Option<&[f32]>) -> anyhow::Result<String> {
    let report = serde_json::json!({
        "url": url,
        "features": features,
        "vector": features.as_f32_vec(),
        "prediction": prediction,
    });

    serde_json::to_string_pretty(&report).context("Failed to serialize report")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();
    }

    let opr_key = args.opr_key.or_else(|| env::var("HAMUS_OPR_KEY").ok());
    let whois_key = args.whois_key.or_else(|| env::var("HAMUS_WHOIS_KEY").ok());

    let mut builder = ExtractorConfig::builder().timeout(args.timeout).offline(args.offline);
    if let Some(key) = opr_key {
        builder = builder.page_rank_key(key);
    } else if args.verbose {
        echo::print_info("No page-rank key; feature stays at -1");
    }
    if let Some(key) = whois_key {
        builder = builder.whois_key(key);
    } else if args.verbose {
        echo::print_info("No WHOIS key; feature stays at -1");
    }
    if let Some(ua) = args.user_agent {
        builder = builder.user_agent(ua);
    }

    if args.verbose {
        echo::print_step(1, 3, &format!("Extracting features from {}", args.url.bright_white().underline()));
    }

    let extractor = FeatureExtractor::with_config(builder.build());
    let features = extractor.extract(&args.url).await;

    let prediction = match &args.model {
        Some(path) => {
            if args.verbose {
                echo::print_step(2, 3, &format!("Scoring with {}", path.display().bright_white()));
            }

            let model = DenseModel::from_file(path)
                .with_context(|| format!("Failed to load model: {}", path.display()))?;
            let prediction = model
                .predict(&features.as_f32_vec())
                .context("Failed to run prediction")?;

            if args.verbose {
                echo::print_info(&format!("Raw output: {:?}", prediction));
            }

            Some(prediction)
        }
        None => {
            if args.verbose {
                echo::print_step(2, 3, "No model supplied; reporting features only");
            }
            None
        }
    };

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
    }

    let report = match args.format {
        OutputFormat::Text => render_text(&args.url, &features, prediction.as_deref()),
        OutputFormat::Json => render_json(&args.url, &features, prediction.as_deref())?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, report).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", report);
        }
    }

    Ok(())
}
