use anyhow::Result;
use claimguard_security::PatternRegistry;
use std::fmt::Write;

pub fn list(registry: &PatternRegistry) -> Result<()> {
    print!("{}", render(registry));
    Ok(())
}

fn render(registry: &PatternRegistry) -> String {
    let mut out = String::from("Detectors:\n");
    for rule in registry.iter() {
        let _ = writeln!(out, "  {} - {}", rule.name(), rule.description());
        let _ = writeln!(out, "    pattern:     {}", rule.pattern().as_str());
        let _ = writeln!(out, "    replacement: {}", rule.replacement());
    }
    out
}
