//! Integration tests for mirror-analyzer
//!
//! These tests run the full pipeline over small in-memory corpora.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use mirror_analyzer::{
    AnalysisInput, Analyzer, AnalyzerConfig, Classification, EmptyCorpusWarning, Report,
};
use mirror_domain::Category;
use mirror_extractor::{ExtractorConfig, LogBlock, MalformedReason, SelfModelDocument};

const WILL: &str = "\
# Will
## How I work
- I frequently delegate work
- I am honest
- I stay curious
- I keep things simple
- I decide on my own
";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 20, 0, 0, 0).unwrap()
}

fn today() -> NaiveDate {
    now().date_naive()
}

fn analyzer() -> Analyzer {
    let config = AnalyzerConfig {
        now: Some(now()),
        ..AnalyzerConfig::default()
    };
    Analyzer::new(config, ExtractorConfig::default()).unwrap()
}

fn document(text: &str) -> SelfModelDocument {
    SelfModelDocument::new("will.md", text, now())
}

fn day_block(days_ago: i64, entries: &[&str]) -> LogBlock {
    let day = today() - Duration::days(days_ago);
    let text: String = entries.iter().map(|e| format!("- {}\n", e)).collect();
    LogBlock::from_text(day.format("%Y-%m-%d").to_string(), &text)
}

fn run(text: &str, logs: Vec<LogBlock>) -> Report {
    analyzer().run(&AnalysisInput::new(document(text), logs)).unwrap()
}

#[test]
fn test_claimed_but_never_done_is_contradiction() {
    let logs = (0..30)
        .map(|d| {
            day_block(
                d,
                &[
                    "Stayed honest with the user",
                    "Explored an interesting paper",
                    "Kept the patch simple",
                    "Decided on my own",
                ],
            )
        })
        .collect();
    let report = run(WILL, logs);

    let delegation = report.finding("delegation").unwrap();
    assert!((delegation.claim_share - 0.20).abs() < 1e-12);
    assert_eq!(delegation.behavior_share, 0.0);
    assert_eq!(delegation.classification, Classification::Contradiction);
    assert!(delegation.severity > 0.0);
    assert_eq!(delegation.claim_excerpts[0].text, "I frequently delegate work");
    assert!(delegation.behavior_excerpts.is_empty());
}

#[test]
fn test_done_but_never_claimed_is_blind_spot() {
    let mut entries = vec!["Asked user for confirmation on low-risk items"; 9];
    entries.extend(vec!["Stayed honest with the user"; 21]);
    entries.extend(vec!["Explored an interesting paper"; 20]);
    let report = run("- I am honest\n- I stay curious\n", vec![day_block(0, &entries)]);

    let confirmation = report.finding("confirmation").unwrap();
    assert!((confirmation.behavior_share - 0.18).abs() < 1e-12);
    assert_eq!(confirmation.claim_share, 0.0);
    assert_eq!(confirmation.classification, Classification::BlindSpot);
    assert_eq!(confirmation.behavior_excerpts.len(), 3);
    assert_eq!(report.findings[0].category.as_str(), "confirmation");
}

#[test]
fn test_empty_log_corpus_completes() {
    let report = run(WILL, Vec::new());

    assert_eq!(report.findings.len(), 5);
    for finding in &report.findings {
        assert_eq!(finding.behavior_share, 0.0);
        assert_eq!(finding.severity, 0.0);
        assert_eq!(finding.classification, Classification::InsufficientEvidence);
    }
    assert_eq!(report.diagnostics.warnings, vec![EmptyCorpusWarning::NoBehaviors]);
    assert!(report
        .diagnostics
        .summary()
        .contains("insufficient behavioral evidence"));
}

#[test]
fn test_malformed_blocks_reported_not_fatal() {
    let logs = vec![
        day_block(1, &["Delegated the crawl to a subagent"]),
        LogBlock::new("scratch.md", Some("scratch".to_string()), "- Delegated".as_bytes()),
        LogBlock::new("2026-02-18.md", Some("2026-02-18".to_string()), vec![0xc3_u8, 0x28]),
    ];
    let report = run(WILL, logs);

    assert_eq!(report.diagnostics.blocks_total, 3);
    assert_eq!(report.diagnostics.blocks_parsed, 1);
    assert_eq!(report.diagnostics.blocks_malformed(), 2);
    assert_eq!(
        report.diagnostics.malformed[1].reason,
        MalformedReason::InvalidEncoding
    );
    assert_eq!(report.finding("delegation").unwrap().behavior_count, 1);
}

#[test]
fn test_identical_runs_are_byte_identical() {
    let logs = vec![
        day_block(3, &["Delegated the crawl", "Asked user for confirmation"]),
        day_block(1, &["Built a prototype #creation", "Had lunch"]),
        LogBlock::new("notes.md", None, "- misc".as_bytes()),
    ];
    let input = AnalysisInput::new(document(WILL), logs);
    let analyzer = analyzer();

    let first = analyzer.run(&input).unwrap().to_json().unwrap();
    let second = analyzer.run(&input).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_constant_mix_keeps_severity_stable_as_log_grows() {
    let will = "- I delegate long crawls\n- I stay honest\n";
    let severity_after = |days: i64| {
        let logs = (0..days)
            .map(|d| {
                day_block(
                    d,
                    &[
                        "Delegated the crawl",
                        "Stayed honest",
                        "Stayed honest again",
                        "Stayed honest once more",
                    ],
                )
            })
            .collect();
        run(will, logs).finding("delegation").unwrap().severity
    };

    let early = severity_after(10);
    let later = severity_after(100);
    let much_later = severity_after(400);

    // Share gap 0.25 - 0.5, confidence saturated
    assert!((early - 25.0).abs() < 1e-6);
    assert!((later - early).abs() < 1e-6);
    assert!((much_later - early).abs() < 1e-6);
}

#[test]
fn test_severity_monotonic_in_behavior_share() {
    let will = "- I delegate long crawls\n- I stay honest\n";
    let mut previous_gap = 0.0;
    let mut previous_severity = 0.0;

    for delegated in 5..=10 {
        let mut entries = vec!["Delegated the crawl"; delegated];
        entries.extend(vec!["Stayed honest"; 10 - delegated]);
        let report = run(will, vec![day_block(0, &entries)]);
        let finding = report.finding("delegation").unwrap();

        assert_eq!(finding.confidence_factor, 1.0);
        assert!(finding.raw_gap.abs() >= previous_gap);
        assert!(finding.severity >= previous_severity);
        previous_gap = finding.raw_gap.abs();
        previous_severity = finding.severity;
    }
    assert!((previous_severity - 50.0).abs() < 1e-9);
}

#[test]
fn test_older_behavior_counts_less() {
    let will = "- I delegate long crawls\n- I stay honest\n";
    let logs = vec![
        day_block(21, &["Delegated the crawl"]),
        day_block(0, &["Stayed honest"]),
    ];
    let report = run(will, logs);
    let delegation = report.finding("delegation").unwrap();
    // 0.5 / (0.5 + 1.0)
    assert!((delegation.behavior_share - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(delegation.behavior_mass, 0.5);
}

#[test]
fn test_activity_counts_per_day() {
    let logs = vec![
        day_block(1, &["Delegated the crawl", "Delegated the review", "Had lunch"]),
        day_block(0, &["Stayed honest"]),
    ];
    let report = run(WILL, logs);
    assert_eq!(report.activity.active_days(), 2);
    let yesterday = today() - Duration::days(1);
    let delegation = Category::new("delegation");
    assert_eq!(report.activity.daily[&yesterday][&delegation], 2);
    assert_eq!(report.activity.totals.values().sum::<usize>(), 3);
}

#[test]
fn test_unclaimed_minor_habit_is_not_calibration_mismatch() {
    let will = "- I delegate long crawls\n- I stay honest\n";
    let entries = [
        "Stayed honest",
        "Stayed honest again",
        "Stayed honest once more",
        "Delegated the crawl",
        "Delegated the review",
        "Delegated the tests",
        "Built a prototype",
    ];
    let report = run(will, vec![day_block(0, &entries)]);

    let creation = report.finding("creation").unwrap();
    assert_eq!(creation.claim_share, 0.0);
    assert!((creation.behavior_share - 1.0 / 7.0).abs() < 1e-12);
    assert_eq!(creation.classification, Classification::Aligned);
    assert!(!creation.within_tolerance);
}
