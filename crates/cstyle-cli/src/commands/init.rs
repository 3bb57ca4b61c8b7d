//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "cstyle.toml";

const DEFAULT_CONFIG: &str = r##"# cstyle configuration
#
# Command-line flags override the values in this file.

# "standard", or "exercise" to also require a struct and an enum
preset = "standard"

[analyzer]
# Directory to search *.c, *.h and *.ts files in
root = "."

# Check only these files instead of searching the directory
# files = ["main.c", "list.c"]

# Files to skip entirely
whitelist = []

[limits]
# Includes comments and strings
max_line_length = 100
# Counted after formatting, without blank lines and comments
max_function_lines = 60

# Replace the built-in deny-lists
# [deny]
# identifiers = ["goto", "static", "errno"]
# substrings = ["unistd.h", "#pragma"]

# Rules can be disabled by name or code
# [rules.multiple-statements]
# enabled = false
"##;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure limits and rules");
    println!("  2. Run: cstyle check");

    Ok(())
}
