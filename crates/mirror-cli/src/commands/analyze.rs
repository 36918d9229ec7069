//! Analyze command implementation.

use crate::cli::{AnalyzeArgs, PresetArg};
use crate::config::Config;
use crate::error::Result;
use crate::input::load_input;
use crate::output::Formatter;
use chrono::NaiveTime;
use mirror_analyzer::{Analyzer, AnalyzerConfig, Report};
use std::fs;
use tracing::info;

/// Execute the analyze command.
pub fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = run_analysis(&args, config)?;
    let rendered = formatter.format_report(&report, args.all)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered))?;
            eprintln!(
                "{}",
                formatter.success(&format!(
                    "Report written to {} ({} actionable finding(s))",
                    path.display(),
                    report.actionable().count()
                ))
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Build the analyzer from configuration and flags, load the corpora and run.
pub fn run_analysis(args: &AnalyzeArgs, config: &Config) -> Result<Report> {
    config.validate()?;
    let analysis = effective_config(args, &config.analysis);
    let analyzer = Analyzer::new(analysis, config.extraction.clone())?;

    let input = load_input(&args.self_model, &args.logs)?;
    let report = analyzer.run(&input)?;
    info!(
        "{} of {} categories need attention",
        report.actionable().count(),
        report.findings.len()
    );
    Ok(report)
}

/// Apply command-line overrides on top of the configured analysis settings.
///
/// A preset replaces evidence and threshold settings but keeps the
/// configured half-lives; `--half-life` then overrides both corpora.
fn effective_config(args: &AnalyzeArgs, configured: &AnalyzerConfig) -> AnalyzerConfig {
    let mut config = match args.preset {
        None => configured.clone(),
        Some(preset) => {
            let base = match preset {
                PresetArg::Default => AnalyzerConfig::default(),
                PresetArg::Strict => AnalyzerConfig::strict(),
                PresetArg::Lenient => AnalyzerConfig::lenient(),
            };
            AnalyzerConfig {
                half_life_days: configured.half_life_days,
                claim_half_life_days: configured.claim_half_life_days,
                behavior_half_life_days: configured.behavior_half_life_days,
                max_excerpts_per_finding: configured.max_excerpts_per_finding,
                now: configured.now,
                ..base
            }
        }
    };

    if let Some(days) = args.half_life {
        config.half_life_days = days;
        config.claim_half_life_days = None;
        config.behavior_half_life_days = None;
    }
    if let Some(day) = args.now {
        config.now = Some(day.and_time(NaiveTime::MIN).and_utc());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use chrono::{NaiveDate, TimeZone, Utc};
    use mirror_analyzer::Classification;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn args(dir: &Path) -> AnalyzeArgs {
        AnalyzeArgs {
            self_model: dir.join("will.md"),
            logs: dir.join("memory"),
            now: NaiveDate::from_ymd_opt(2026, 2, 20),
            output: None,
            all: false,
            preset: None,
            half_life: None,
        }
    }

    fn write_corpus(dir: &Path) {
        fs::write(
            dir.join("will.md"),
            "# Will\n## How I work\n- I frequently delegate work\n- I am honest\n",
        )
        .unwrap();
        let memory = dir.join("memory");
        fs::create_dir(&memory).unwrap();
        for day in 10..20 {
            fs::write(
                memory.join(format!("2026-02-{}.md", day)),
                "- Stayed honest with the user\n- Admitted a mistake candidly\n",
            )
            .unwrap();
        }
        fs::write(memory.join("README.md"), "- not a day\n").unwrap();
    }

    #[test]
    fn test_effective_config_overrides() {
        let dir = PathBuf::from("unused");
        let mut args = args(&dir);
        args.preset = Some(PresetArg::Strict);
        args.half_life = Some(7);

        let configured = AnalyzerConfig {
            claim_half_life_days: Some(90),
            ..AnalyzerConfig::default()
        };
        let config = effective_config(&args, &configured);

        assert_eq!(config.min_evidence_count, AnalyzerConfig::strict().min_evidence_count);
        assert_eq!(config.half_life_days, 7);
        assert_eq!(config.claim_half_life_days, None);
        assert_eq!(
            config.now,
            Some(Utc.with_ymd_and_hms(2026, 2, 20, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_preset_keeps_configured_half_lives() {
        let dir = PathBuf::from("unused");
        let mut args = args(&dir);
        args.preset = Some(PresetArg::Lenient);

        let configured = AnalyzerConfig {
            half_life_days: 30,
            ..AnalyzerConfig::default()
        };
        let config = effective_config(&args, &configured);
        assert_eq!(config.half_life_days, 30);
        assert_eq!(config.calibration_gap_threshold, 0.07);
    }

    #[test]
    fn test_run_analysis_end_to_end() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());

        let report = run_analysis(&args(dir.path()), &Config::default()).unwrap();
        let delegation = report.finding("delegation").unwrap();
        assert_eq!(delegation.classification, Classification::Contradiction);
        assert_eq!(report.diagnostics.blocks_total, 11);
        assert_eq!(report.diagnostics.blocks_malformed(), 1);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());
        let mut args = args(dir.path());
        args.half_life = Some(0);

        assert!(matches!(
            run_analysis(&args, &Config::default()),
            Err(crate::error::CliError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_output_settings_rejected() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());
        let mut config = Config::default();
        config.output.excerpts_shown = 0;

        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(matches!(
            execute_analyze(args(dir.path()), &config, &formatter),
            Err(crate::error::CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_report_written_to_file() {
        let dir = tempdir().unwrap();
        write_corpus(dir.path());
        let mut args = args(dir.path());
        let out = dir.path().join("report.json");
        args.output = Some(out.clone());

        let formatter = Formatter::new(OutputFormat::Json, false);
        execute_analyze(args, &Config::default(), &formatter).unwrap();

        let written = fs::read_to_string(out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        let findings = value["findings"].as_array().unwrap();
        assert!(findings
            .iter()
            .any(|f| f["category"] == "delegation" && f["classification"] == "contradiction"));
    }
}
