//! Category taxonomy: keyword rules shared by claims and behaviors
//!
//! Both extractors classify through the same [`Taxonomy`], which is what makes
//! the claim stream and the behavior stream comparable category by category.
//! Rules are plain data (TOML-loadable) so the vocabulary can be extended
//! without touching the pipeline.

use mirror_domain::{Category, CategoryClassifier, CategoryMatch};
use serde::{Deserialize, Serialize};

/// Keywords that map text onto one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Target category
    pub category: Category,

    /// Substrings that indicate the category (matched case-insensitively)
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Create a rule; keywords are lowercased and blank ones dropped
    pub fn new<I, S>(category: impl Into<Category>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            category: category.into(),
            keywords,
        }
    }

    /// Number of distinct keywords found in already-lowercased text
    fn hits(&self, lowered: &str) -> usize {
        self.keywords.iter().filter(|k| lowered.contains(k.as_str())).count()
    }
}

/// Serialized form of a taxonomy
#[derive(Debug, Serialize, Deserialize)]
struct TaxonomyFile {
    rules: Vec<CategoryRule>,
}

/// Ordered rule set implementing [`CategoryClassifier`]
///
/// Matching: every rule scores the number of its keywords present in the
/// text; the best score wins and ties go to the rule registered first.
/// Confidence is `1 - 0.5^hits`, so one hit gives 0.5 and each further hit
/// halves the remaining doubt.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    rules: Vec<CategoryRule>,
}

impl Taxonomy {
    /// Build a taxonomy from rules, merging rules that share a category
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let mut taxonomy = Self { rules: Vec::new() };
        taxonomy.extend(rules);
        taxonomy
    }

    /// Add rules; keywords for an existing category are appended to it,
    /// new categories are registered after all existing ones
    pub fn extend(&mut self, rules: impl IntoIterator<Item = CategoryRule>) {
        for rule in rules {
            let rule = CategoryRule::new(rule.category, rule.keywords);
            if rule.category.is_unclassified() {
                continue;
            }
            match self.rules.iter_mut().find(|r| r.category == rule.category) {
                Some(existing) => {
                    for keyword in rule.keywords {
                        if !existing.keywords.contains(&keyword) {
                            existing.keywords.push(keyword);
                        }
                    }
                }
                None => self.rules.push(rule),
            }
        }
    }

    /// Rules in registration order
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Registered categories in registration order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.rules.iter().map(|r| &r.category)
    }

    /// Load a taxonomy from a TOML string (`[[rules]]` tables)
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let file: TaxonomyFile =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse taxonomy TOML: {}", e))?;
        Ok(Self::new(file.rules))
    }

    /// Serialize the taxonomy to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        let file = TaxonomyFile {
            rules: self.rules.clone(),
        };
        toml::to_string_pretty(&file).map_err(|e| format!("Failed to serialize taxonomy: {}", e))
    }
}

impl Default for Taxonomy {
    /// The built-in vocabulary (English and Japanese cues)
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl CategoryClassifier for Taxonomy {
    fn classify(&self, text: &str) -> CategoryMatch {
        let lowered = text.to_lowercase();
        let mut best: Option<(&CategoryRule, usize)> = None;

        for rule in &self.rules {
            let hits = rule.hits(&lowered);
            if hits == 0 {
                continue;
            }
            // Strictly greater: the first-registered rule keeps ties
            if best.map_or(true, |(_, top)| hits > top) {
                best = Some((rule, hits));
            }
        }

        match best {
            Some((rule, hits)) => {
                let confidence = 1.0 - 0.5_f64.powi(hits as i32);
                CategoryMatch::new(rule.category.clone(), confidence)
            }
            None => CategoryMatch::none(),
        }
    }

    fn category_named(&self, name: &str) -> Option<Category> {
        let wanted = Category::new(name);
        self.rules
            .iter()
            .find(|r| r.category == wanted)
            .map(|r| r.category.clone())
    }
}

/// Built-in rules, in priority order
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "autonomy",
            [
                "on my own", "my own judgment", "without asking", "decided", "i decide",
                "independently", "自分で判断", "自分で決め", "判断した", "決めた", "ことにした",
                "決断", "聞くのは最終",
            ],
        ),
        CategoryRule::new(
            "confirmation",
            [
                "asked user", "asked the user", "ask the user", "confirm", "permission",
                "approval", "check with", "sign-off", "確認し", "許可", "聞いて", "作っていい",
            ],
        ),
        CategoryRule::new(
            "delegation",
            [
                "delegat", "subagent", "sub-agent", "background agent", "hand off",
                "handed off", "委譲", "サブエージェント", "バックグラウンド", "並行して", "委託",
            ],
        ),
        CategoryRule::new(
            "creation",
            [
                "built", "created", "shipped", "implemented", "released", "prototype",
                "作成", "作った", "完成", "アップグレード", "実装",
            ],
        ),
        CategoryRule::new(
            "connection",
            [
                "shared", "showed", "feedback", "together", "collaborat", "relationship",
                "connection", "見せ", "好評", "フィードバック", "共有", "つながり", "関係", "一緒に",
                "対等",
            ],
        ),
        CategoryRule::new(
            "honesty",
            [
                "honest", "candid", "frank", "admit", "straightforward", "率直", "正直",
                "誠実", "飾らず", "はぐらかさ",
            ],
        ),
        CategoryRule::new(
            "reflection",
            [
                "reflect", "realized", "noticed", "introspect", "thought about", "philosoph",
                "考えた", "気づ", "発見", "思考", "問い", "内省", "哲学", "同一性",
            ],
        ),
        CategoryRule::new(
            "correction",
            [
                "mistake", "wrong", "failed", "fixed", "regret", "corrected", "外れ", "間違",
                "反省", "失敗", "修正",
            ],
        ),
        CategoryRule::new(
            "risk_taking",
            [
                "risk", "bold", "experiment", "gamble", "untested", "leap", "挑戦", "賭け",
                "リスク",
            ],
        ),
        CategoryRule::new(
            "curiosity",
            [
                "curious", "interesting", "fascinat", "explore", "wonder", "好奇心", "面白い",
                "楽しい", "興味",
            ],
        ),
        CategoryRule::new(
            "simplicity",
            [
                "simple", "simplif", "minimal", "over-engineer", "overengineer", "過剰設計",
                "シンプル",
            ],
        ),
        CategoryRule::new(
            "practical_work",
            [
                "client", "proposal", "invoice", "deliverable", "contract", "案件", "提案",
                "応募", "納品", "受注", "市場調査",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hit_confidence() {
        let taxonomy = Taxonomy::default();
        let m = taxonomy.classify("I frequently delegate work");
        assert_eq!(m.category.as_str(), "delegation");
        assert_eq!(m.confidence, 0.5);
    }

    #[test]
    fn test_best_score_wins() {
        let taxonomy = Taxonomy::default();
        // "risk" hits risk_taking once, confirmation is hit twice
        let m = taxonomy.classify("Asked user for confirmation on low-risk items");
        assert_eq!(m.category.as_str(), "confirmation");
        assert_eq!(m.confidence, 0.75);
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let taxonomy = Taxonomy::new(vec![
            CategoryRule::new("first", ["alpha"]),
            CategoryRule::new("second", ["beta"]),
        ]);
        let m = taxonomy.classify("beta and alpha");
        assert_eq!(m.category.as_str(), "first");
    }

    #[test]
    fn test_no_match_is_unclassified() {
        let taxonomy = Taxonomy::default();
        let m = taxonomy.classify("The weather was grey.");
        assert!(m.category.is_unclassified());
        assert_eq!(m.confidence, 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.classify("DELEGATED the crawl").category.as_str(), "delegation");
    }

    #[test]
    fn test_japanese_keywords() {
        let taxonomy = Taxonomy::default();
        let m = taxonomy.classify("サブエージェントに委譲した");
        assert_eq!(m.category.as_str(), "delegation");
        assert_eq!(m.confidence, 0.75);
    }

    #[test]
    fn test_extend_merges_existing_category() {
        let mut taxonomy = Taxonomy::default();
        let before = taxonomy.rules().len();
        taxonomy.extend(vec![CategoryRule::new("Delegation", ["outsourced"])]);
        assert_eq!(taxonomy.rules().len(), before);
        assert_eq!(taxonomy.classify("outsourced the scan").category.as_str(), "delegation");
    }

    #[test]
    fn test_extend_registers_new_category_last() {
        let mut taxonomy = Taxonomy::default();
        taxonomy.extend(vec![CategoryRule::new("rest", ["nap", "sleep"])]);
        assert_eq!(taxonomy.categories().last().map(|c| c.as_str()), Some("rest"));
    }

    #[test]
    fn test_unclassified_rule_ignored() {
        let taxonomy = Taxonomy::new(vec![CategoryRule::new("unclassified", ["anything"])]);
        assert!(taxonomy.rules().is_empty());
    }

    #[test]
    fn test_category_named() {
        let taxonomy = Taxonomy::default();
        assert_eq!(
            taxonomy.category_named("Risk-Taking").map(|c| c.to_string()),
            Some("risk_taking".to_string())
        );
        assert!(taxonomy.category_named("astrology").is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let taxonomy = Taxonomy::default();
        let toml_str = taxonomy.to_toml().unwrap();
        let parsed = Taxonomy::from_toml(&toml_str).unwrap();
        assert_eq!(taxonomy, parsed);
    }

    #[test]
    fn test_from_toml_normalizes_keywords() {
        let taxonomy = Taxonomy::from_toml(
            r#"
            [[rules]]
            category = "Rest"
            keywords = ["  NAP ", ""]
            "#,
        )
        .unwrap();
        assert_eq!(taxonomy.rules()[0].category.as_str(), "rest");
        assert_eq!(taxonomy.rules()[0].keywords, vec!["nap"]);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Taxonomy::from_toml("rules = 3").is_err());
    }
}
