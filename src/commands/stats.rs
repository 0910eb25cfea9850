//! Stats command handler - extract statistics from a captured transcript

use std::fs;
use std::io::Read;

use crate::cli::{OutputFormat, StatsArgs};
use crate::commands::CommandContext;
use crate::error::Result;
use crate::stats::collect_stats;

/// Run the stats command
pub fn run_stats(args: &StatsArgs, ctx: &CommandContext) -> Result<String> {
    let input = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if ctx.verbose {
        tracing::info!(bytes = input.len(), "parsing transcript");
    }

    let stats = collect_stats(&input)?;

    let mut output = String::new();
    match ctx.format {
        OutputFormat::Json => {
            let json_value = serde_json::json!({
                "_type": "stats",
                "count": stats.len(),
                "measurements": stats.iter().collect::<Vec<_>>(),
            });
            output = serde_json::to_string_pretty(&json_value).unwrap_or_default();
            output.push('\n');
        }
        OutputFormat::Text => {
            if stats.is_empty() {
                output.push_str("no statistics found\n");
            }
            for m in stats.iter() {
                output.push_str(&format!("{}: {} {}\n", m.name, m.value, m.units));
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn transcript_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("transcript.log");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "Memory after building targets: 1048576").unwrap();
        writeln!(f, "Total build time: 3.5 seconds").unwrap();
        path
    }

    #[test]
    fn test_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let args = StatsArgs {
            file: Some(transcript_file(&dir)),
        };
        let output = run_stats(&args, &CommandContext::default()).unwrap();
        assert_eq!(output, "memory-final: 1024 kbytes\ntime-total: 3.5 seconds\n");
    }

    #[test]
    fn test_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let args = StatsArgs {
            file: Some(transcript_file(&dir)),
        };
        let ctx = CommandContext {
            format: OutputFormat::Json,
            verbose: false,
        };
        let output = run_stats(&args, &ctx).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["measurements"][0]["name"], "memory-final");
        assert_eq!(parsed["measurements"][0]["value"], 1024);
        assert_eq!(parsed["measurements"][1]["value"], 3.5);
    }

    #[test]
    fn test_empty_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.log");
        fs::write(&path, "nothing to see\n").unwrap();
        let args = StatsArgs { file: Some(path) };
        let output = run_stats(&args, &CommandContext::default()).unwrap();
        assert_eq!(output, "no statistics found\n");
    }
}
