//! Render a field chart to SVG on stdout.
//!
//! Usage: `cargo run --example render_field [--features tracing] -- [input.json] [config.toml]`
//!
//! Without arguments a small built-in dataset is rendered. Set `RUST_LOG=debug`
//! with the `tracing` feature to see fallbacks and clamps.

use std::process::ExitCode;

use fieldbars::{ChartConfig, parse_input, render};
use miette::{IntoDiagnostic, WrapErr};
use tracing_subscriber::EnvFilter;

const SAMPLE_FIELD: &str = r#"[
  {
    "parcel": "Parcela 1",
    "samples": [
      { "parameter": "pH", "attention": "yellow", "direction": "left", "date": "2025-03-01" },
      { "parameter": "pH", "attention": "dark-green", "direction": "center" },
      { "parameter": "N", "attention": "light-green" },
      { "parameter": "K", "attention": "orange", "note": "check drainage" }
    ]
  },
  {
    "parcel": "Parcela 2",
    "samples": [
      { "parameter": "pH", "attention": "dark-green", "direction": "center" },
      { "parameter": "K", "attention": "red", "severity": 4 }
    ]
  },
  {
    "parcel": "Parcela 3",
    "samples": []
  }
]"#;

fn run() -> miette::Result<String> {
    let mut args = std::env::args().skip(1);

    let (name, source) = match args.next() {
        Some(path) => {
            let source = std::fs::read_to_string(&path)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading {path}"))?;
            (path, source)
        }
        None => ("<built-in>".to_string(), SAMPLE_FIELD.to_string()),
    };

    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading {path}"))?;
            ChartConfig::from_toml_str(&path, &text)?
        }
        None => ChartConfig::default(),
    };

    let input = parse_input(&name, &source)?;
    Ok(render(&input, &config).to_svg())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(svg) => {
            print!("{svg}");
            ExitCode::SUCCESS
        }
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}
