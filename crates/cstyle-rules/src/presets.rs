//! Rule presets and rule selection.

use std::str::FromStr;

use cstyle_core::{Config, ProjectRuleBox, RuleBox};
use tracing::warn;

use crate::{
    CFileInclude, DisallowedCharacters, DisallowedIdentifiers, DisallowedSubstrings, FileSetSize,
    FunctionTooLong, LargeStackArray, LineTooLong, MultipleStatements, NoGlobals,
    RequireStructEnum, UnsafeScanf,
};

/// Preset configurations for cstyle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// The full per-file battery plus the file-set size check.
    #[default]
    Standard,
    /// Standard, plus the requirement to use a struct and an enum.
    Exercise,
}

impl Preset {
    /// Preset name as used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Exercise => "exercise",
        }
    }

    /// Returns the per-file rules for this preset, in check order.
    ///
    /// Both presets share the same per-file battery.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn rules(self, config: &Config) -> Vec<RuleBox> {
        standard_rules(config)
    }

    /// Returns the project rules for this preset.
    #[must_use]
    pub fn project_rules(self) -> Vec<ProjectRuleBox> {
        match self {
            Self::Standard => vec![Box::new(FileSetSize::new())],
            Self::Exercise => vec![
                Box::new(FileSetSize::new()),
                Box::new(RequireStructEnum::new()),
            ],
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "exercise" => Ok(Self::Exercise),
            other => Err(format!(
                "unknown preset '{other}' (expected 'standard' or 'exercise')"
            )),
        }
    }
}

/// Returns the standard per-file battery, in check order.
///
/// Limits and deny-lists come from `config`:
/// 1. `no-globals` (CS001)
/// 2. `disallowed-identifiers` (CS002)
/// 3. `disallowed-substrings` (CS003)
/// 4. `unsafe-scanf` (CS004)
/// 5. `c-file-include` (CS005)
/// 6. `large-stack-array` (CS006)
/// 7. `line-too-long` (CS007) on the raw text
/// 8. `multiple-statements` (CS008)
/// 9. `line-too-long` (CS007) on the formatted text
/// 10. `disallowed-characters` (CS009)
/// 11. `function-too-long` (CS010)
#[must_use]
pub fn standard_rules(config: &Config) -> Vec<RuleBox> {
    let limits = config.limits;

    let identifiers = config
        .deny
        .identifiers
        .clone()
        .map_or_else(DisallowedIdentifiers::new, DisallowedIdentifiers::with_identifiers);
    let substrings = config
        .deny
        .substrings
        .clone()
        .map_or_else(DisallowedSubstrings::new, DisallowedSubstrings::with_substrings);

    vec![
        Box::new(NoGlobals::new()),
        Box::new(identifiers),
        Box::new(substrings),
        Box::new(UnsafeScanf::new()),
        Box::new(CFileInclude::new()),
        Box::new(LargeStackArray::new()),
        Box::new(LineTooLong::new().max_line_length(limits.max_line_length)),
        Box::new(MultipleStatements::new()),
        Box::new(LineTooLong::formatted().max_line_length(limits.max_line_length)),
        Box::new(DisallowedCharacters::new()),
        Box::new(FunctionTooLong::new().max_function_lines(limits.max_function_lines)),
    ]
}

/// Returns one instance of every per-file rule, with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoGlobals::new()),
        Box::new(DisallowedIdentifiers::new()),
        Box::new(DisallowedSubstrings::new()),
        Box::new(UnsafeScanf::new()),
        Box::new(CFileInclude::new()),
        Box::new(LargeStackArray::new()),
        Box::new(LineTooLong::new()),
        Box::new(MultipleStatements::new()),
        Box::new(DisallowedCharacters::new()),
        Box::new(FunctionTooLong::new()),
    ]
}

/// Returns every project rule, with default settings.
#[must_use]
pub fn all_project_rules() -> Vec<ProjectRuleBox> {
    vec![Box::new(FileSetSize::new()), Box::new(RequireStructEnum::new())]
}

/// Keeps only the rules named in `selection` (by name or code), preserving
/// check order. Unknown names are logged and ignored.
#[must_use]
pub fn select(
    rules: Vec<RuleBox>,
    project_rules: Vec<ProjectRuleBox>,
    selection: &[String],
) -> (Vec<RuleBox>, Vec<ProjectRuleBox>) {
    let selected = |name: &str, code: &str| selection.iter().any(|s| s == name || s == code);

    for wanted in selection {
        let known = all_rules()
            .iter()
            .any(|r| r.name() == wanted || r.code() == wanted)
            || all_project_rules()
                .iter()
                .any(|r| r.name() == wanted || r.code() == wanted);
        if !known {
            warn!("Unknown rule: {}", wanted);
        }
    }

    let rules = rules
        .into_iter()
        .filter(|r| selected(r.name(), r.code()))
        .collect();
    let project_rules = project_rules
        .into_iter()
        .filter(|r| selected(r.name(), r.code()))
        .collect();

    (rules, project_rules)
}
