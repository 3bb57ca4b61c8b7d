//! Check command implementation.

use anyhow::{anyhow, Context, Result};
use cstyle_core::{Analyzer, AnalyzerError, Config};
use cstyle_rules::{select, Preset};
use std::path::Path;

use crate::config_resolver;
use crate::CheckArgs;

/// Runs the check command.
pub fn run(args: &CheckArgs, config_path: Option<&Path>) -> Result<()> {
    let project_dir = args.directory.as_deref().unwrap_or_else(|| Path::new("."));
    let source = config_resolver::resolve(project_dir, config_path);
    let mut config = source.load()?;
    apply_overrides(&mut config, args);

    let preset = match args.preset.as_deref().or(config.preset.as_deref()) {
        Some(name) => name.parse::<Preset>().map_err(|e| anyhow!(e))?,
        None => Preset::default(),
    };

    let mut rules = preset.rules(&config);
    let mut project_rules = preset.project_rules();
    if !args.rules.is_empty() {
        (rules, project_rules) = select(rules, project_rules, &args.rules);
    }

    let mut builder = Analyzer::builder().config(config);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    for rule in project_rules {
        builder = builder.project_rule_box(rule);
    }

    let analyzer = match builder.build() {
        Ok(analyzer) => analyzer,
        Err(e) => fail(e),
    };

    tracing::info!(
        "Checking {} with preset {} and {} rules",
        analyzer.root().display(),
        preset.name(),
        analyzer.rule_count()
    );

    let result = match analyzer.analyze() {
        Ok(result) => result,
        Err(e) => fail(e),
    };

    super::output::print(&result, args.format).context("Failed to print results")?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Applies command-line flags on top of the loaded configuration.
fn apply_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(max) = args.max_line_length {
        config.limits.max_line_length = max;
    }
    if let Some(max) = args.max_function_lines {
        config.limits.max_function_lines = max;
    }
    if let Some(directory) = &args.directory {
        config.analyzer.root.clone_from(directory);
    }
    if !args.files.is_empty() {
        config.analyzer.files.clone_from(&args.files);
    }
    config
        .analyzer
        .whitelist
        .extend(args.whitelist.iter().cloned());
}

/// Prints a run-stopping error as a diagnostic and exits with status 1.
fn fail(error: AnalyzerError) -> ! {
    eprintln!("{:?}", miette::Report::new(error));
    std::process::exit(1);
}
