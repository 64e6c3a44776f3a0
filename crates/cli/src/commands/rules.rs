use colored::*;
use core_classifier::Rule;
use std::path::Path;

pub fn run(rules: Option<&Path>) -> anyhow::Result<()> {
    let registry = super::load_registry(rules)?;

    for (i, stage) in registry.stages().iter().enumerate() {
        println!("{} {}", format!("Stage {}:", i + 1).bold(), stage.name());
        for rule in stage.rules() {
            println!("  {}", describe(rule));
        }
        println!();
    }

    Ok(())
}

fn describe(rule: &Rule) -> String {
    let recipe = rule.recipe();
    let mut ids = vec![format!("business@{}", recipe.business)];
    if let Some(slot) = recipe.instance {
        ids.push(format!("{}@{}", slot.role, slot.index));
    }
    for slot in &recipe.secondary {
        ids.push(format!("({})@{}", slot.role, slot.index));
    }

    let mut line = format!(
        "{} {:<42} {} {}/{} [{}]",
        format!("{:<7}", rule.method().as_str()).cyan(),
        rule.pattern().as_str(),
        rule.name(),
        recipe.sub_kind,
        recipe.action,
        ids.join(", ")
    );
    let reserved: Vec<_> = rule
        .reserved_words()
        .iter()
        .map(|(index, word)| format!("{word}@{index}"))
        .collect();
    if !reserved.is_empty() {
        line.push_str(&format!(" not {}", reserved.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_classifier::Registry;

    #[test]
    fn test_describe_lists_identifier_slots() {
        colored::control::set_override(false);
        let registry = Registry::builtin().unwrap();
        let line = describe(registry.rule("update process config template version").unwrap());

        assert!(line.starts_with("POST "));
        assert!(line.contains("/api/v3/template/version/*/#/#/#"));
        assert!(line.contains("ProcessConfigTemplateVersion/Create"));
        assert!(line.contains("[business@5, version id@7, (template id)@6]"));
        assert!(line.ends_with("not search@4"));
    }

    #[test]
    fn test_describe_lists_every_secondary_slot() {
        colored::control::set_override(false);
        let registry = Registry::builtin().unwrap();
        let line = describe(registry.rule("bind template to process").unwrap());

        assert!(line.contains("[business@5, (process id)@6, (template id)@7]"));
        assert!(!line.contains(" not "));
    }
}
