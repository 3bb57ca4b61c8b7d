//! List rules command implementation.

use cstyle_rules::{all_project_rules, all_rules};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nProject rules:\n");
    for rule in all_project_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  standard  - CS001-CS010, CS100 (default)");
    println!("  exercise  - standard plus CS101");

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  cstyle check --rules line-too-long,function-too-long");
    println!("  cstyle check --rules CS007,CS010");
}
