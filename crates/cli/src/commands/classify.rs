use colored::*;
use core_classifier::{Classifier, ClassifyError, Method, RequestContext, ResourceDescriptor};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(untagged)]
enum Output<'a> {
    Resources {
        resources: &'a [ResourceDescriptor],
    },
    Error {
        error: String,
        bad_segment: &'a str,
    },
}

/// Classify one request; returns `false` when classification failed
pub fn run(method: &str, path: &str, rules: Option<&Path>, json: bool) -> anyhow::Result<bool> {
    let method: Method = method.parse()?;
    let registry = super::load_registry(rules)?;
    let classifier = Classifier::new(&registry);
    let ctx = RequestContext::new(method, path);

    let result = classifier.classify(&ctx);

    if json {
        let output = match &result {
            Ok(resources) => Output::Resources { resources },
            Err(err) => Output::Error {
                error: err.cause(),
                bad_segment: err.bad_segment(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(result.is_ok());
    }

    println!("{} {} {}", "Classifying:".bold(), method, path);
    if let Some((stage, rule)) = classifier.matching_rule(&ctx) {
        println!("  {} Stage: {}", "→".cyan(), stage.name());
        println!("  {} Rule: {} ({})", "→".cyan(), rule.name(), rule.pattern());
    }

    println!();
    match result {
        Ok(resources) if resources.is_empty() => {
            println!("{} Not an authorization-gated endpoint", "•".yellow().bold());
            Ok(true)
        }
        Ok(resources) => {
            for resource in &resources {
                print_resource(resource);
            }
            Ok(true)
        }
        Err(err) => {
            print_error(&err);
            Ok(false)
        }
    }
}

fn print_resource(resource: &ResourceDescriptor) {
    println!("{} {}", "✓".green().bold(), resource.name);
    println!("  Kind: {}", resource.kind);
    println!("  Action: {}", resource.action);
    println!("  Business: {}", resource.business_id);
    if let Some(id) = resource.instance_id {
        println!("  Instance: {id}");
    }
    println!("  Scope: {}", scope(resource));
}

fn scope(resource: &ResourceDescriptor) -> &'static str {
    if resource.is_instance_scoped() {
        "instance"
    } else {
        "collection"
    }
}

fn print_error(err: &ClassifyError) {
    println!("{} {}", "✗".red().bold(), err.cause());
    println!("  Bad segment: {}", err.bad_segment().red());
}
