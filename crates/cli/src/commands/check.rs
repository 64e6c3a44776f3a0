use colored::*;
use std::path::Path;

fn label(file: Option<&Path>) -> String {
    file.map_or_else(|| "built-in rules".to_string(), |p| p.display().to_string())
}

pub fn run(file: Option<&Path>) -> anyhow::Result<()> {
    println!("{} {}", "Checking rule table:".bold(), label(file));

    let registry = super::load_registry(file)?;

    for stage in registry.stages() {
        println!(
            "  {} Stage `{}`: {} rule(s)",
            "✓".green(),
            stage.name(),
            stage.rules().len()
        );
    }
    println!("  {} Rules: {}", "✓".green(), registry.rule_count());

    for (_, rule) in registry.rules() {
        for (index, word) in rule.reserved_words().iter() {
            println!(
                "  {} `{}` gives way to `{}` at segment {}",
                "✓".green(),
                rule.name(),
                word,
                index
            );
        }
    }

    let collection_scoped = registry
        .rules()
        .filter(|(_, rule)| rule.recipe().instance.is_none())
        .count();
    println!("  {} Collection-scoped rules: {}", "✓".green(), collection_scoped);

    println!();
    println!("{} Rule table is valid!", "✓".green().bold());

    Ok(())
}
