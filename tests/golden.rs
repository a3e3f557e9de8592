//! Golden SVG tests.
//!
//! Every `tests/fixtures/*.json` input is rendered (with the sibling `.toml`
//! configuration when one exists) and compared against the sibling `.svg`.

use datatest_stable::Utf8Path;
use fieldbars::{ChartConfig, parse_input, render};

/// Format a colored inline diff using dissimilar
fn format_inline_diff(expected: &str, actual: &str) -> String {
    use dissimilar::Chunk;

    let chunks = dissimilar::diff(expected, actual);
    let mut output = String::new();

    output.push_str("\n=== Inline Diff (expected vs actual) ===\n");
    output.push_str("Legend: [-expected only-] [+actual only+] [unchanged]\n\n");

    for chunk in chunks {
        match chunk {
            Chunk::Equal(s) => {
                let lines: Vec<&str> = s.lines().collect();
                if s.len() > 100 && lines.len() > 3 {
                    output.push_str(lines[0]);
                    output.push('\n');
                    output.push_str(&format!("... ({} unchanged lines) ...\n", lines.len() - 2));
                    output.push_str(lines[lines.len() - 1]);
                    output.push('\n');
                } else {
                    output.push_str(s);
                }
            }
            Chunk::Delete(s) => {
                output.push_str("\x1b[31m[-");
                output.push_str(s);
                output.push_str("-]\x1b[0m");
            }
            Chunk::Insert(s) => {
                output.push_str("\x1b[32m[+");
                output.push_str(s);
                output.push_str("+]\x1b[0m");
            }
        }
    }

    output
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn test_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    init_tracing();

    let source = std::fs::read_to_string(path)?;
    let input = parse_input(path.as_str(), &source)?;

    let config_path = path.with_extension("toml");
    let config = if config_path.exists() {
        let text = std::fs::read_to_string(&config_path)?;
        ChartConfig::from_toml_str(config_path.as_str(), &text)?
    } else {
        ChartConfig::default()
    };

    let actual = render(&input, &config).to_svg();
    let expected = std::fs::read_to_string(path.with_extension("svg"))?;

    if actual.trim() != expected.trim() {
        panic!(
            "SVG mismatch for {}:\n{}",
            path,
            format_inline_diff(expected.trim(), actual.trim())
        );
    }

    // Rendering is a pure function of its inputs.
    assert_eq!(render(&input, &config).to_svg(), actual, "second render differs for {path}");

    Ok(())
}

datatest_stable::harness! {
    { test = test_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.json$" },
}
