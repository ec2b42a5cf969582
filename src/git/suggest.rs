//! Commit message suggestion from a `git diff --stat` summary.

use regex::Regex;
use std::sync::OnceLock;

/// Suggested when there are changes but no rule claims them.
pub const FALLBACK_SUGGESTION: &str = "🔧 Update code";

/// Dependency manifests whose appearance in a diff means a dependency bump.
const MANIFESTS: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "requirements.txt",
    "pyproject.toml",
    "go.mod",
];

enum Trigger {
    Any(&'static [&'static str]),
    Pattern(Regex),
}

impl Trigger {
    fn fires(&self, diff: &str) -> bool {
        match self {
            Self::Any(needles) => needles.iter().any(|needle| diff.contains(needle)),
            Self::Pattern(re) => re.is_match(diff),
        }
    }
}

struct CommitRule {
    trigger: Trigger,
    label: &'static str,
}

static RULES: OnceLock<Vec<CommitRule>> = OnceLock::new();

fn pattern(re: &str, label: &'static str) -> Option<CommitRule> {
    Regex::new(re).ok().map(|re| CommitRule {
        trigger: Trigger::Pattern(re),
        label,
    })
}

fn any(needles: &'static [&'static str], label: &'static str) -> Option<CommitRule> {
    Some(CommitRule {
        trigger: Trigger::Any(needles),
        label,
    })
}

/// Ordered rule table; the first firing rule names the commit.
fn rules() -> &'static [CommitRule] {
    RULES.get_or_init(|| {
        [
            any(MANIFESTS, "📦 Update dependencies"),
            pattern(r"test.*\.(js|py|rs)", "✅ Update tests"),
            pattern(r"\.(md|txt|rst)(\s|$)", "📝 Update documentation"),
            any(&["feat", "feature"], "✨ Add new feature"),
            any(&["fix", "bug"], "🐛 Fix bug"),
            pattern(r"\.css|\.scss|style", "💄 Update styles"),
            any(&["refactor"], "♻️ Refactor code"),
        ]
        .into_iter()
        .flatten()
        .collect()
    })
}

/// Pick a commit message for a diff summary. `None` for an empty diff.
pub fn suggest_commit(diff_stat: &str) -> Option<&'static str> {
    if diff_stat.trim().is_empty() {
        return None;
    }
    Some(
        rules()
            .iter()
            .find(|rule| rule.trigger.fires(diff_stat))
            .map_or(FALLBACK_SUGGESTION, |rule| rule.label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme_only_is_documentation() {
        let diff = " README.md | 4 ++--\n 1 file changed, 2 insertions(+), 2 deletions(-)";
        assert_eq!(suggest_commit(diff), Some("📝 Update documentation"));
    }

    #[test]
    fn test_rule_precedence() {
        let diff = " package.json | 2 +-\n tests/test_api.py | 10 ++++\n";
        assert_eq!(suggest_commit(diff), Some("📦 Update dependencies"));

        let diff = " src/test_utils.rs | 3 +++\n docs/guide.md | 1 +\n";
        assert_eq!(suggest_commit(diff), Some("✅ Update tests"));
    }

    #[test]
    fn test_each_label_reachable() {
        let cases = [
            (" Cargo.toml | 1 +", "📦 Update dependencies"),
            (" src/feature_flags.go | 1 +", "✨ Add new feature"),
            (" src/bugfix.go | 1 +", "🐛 Fix bug"),
            (" web/app.scss | 1 +", "💄 Update styles"),
            (" src/refactor_plan.go | 1 +", "♻️ Refactor code"),
        ];
        for (diff, expected) in cases {
            assert_eq!(suggest_commit(diff), Some(expected), "{diff}");
        }
    }

    #[test]
    fn test_fallback_and_empty() {
        assert_eq!(suggest_commit(" src/main.go | 3 ++-"), Some(FALLBACK_SUGGESTION));
        assert_eq!(suggest_commit(""), None);
        assert_eq!(suggest_commit("  \n"), None);
    }

    #[test]
    fn test_rules_all_compile() {
        assert_eq!(rules().len(), 7);
    }
}
