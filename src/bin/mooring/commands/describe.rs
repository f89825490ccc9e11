//! `mooring describe` command

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::DescribeArgs;
use crate::commands::{load_catalog, parse_scheme};
use mooring::capability::{PlannedProperty, PropertyPlan, SchemeKind};
use mooring::store::ClassifiedProperty;
use mooring::{
    Config, ProblemCollector, PropertyCapabilityStore, TypeIntrospector, TypeName,
    ValidationProblem,
};

#[derive(Serialize)]
struct PropertyReport {
    name: String,
    role: String,
    value_type: String,
    markers: Vec<String>,
}

impl PropertyReport {
    fn new(property: &ClassifiedProperty) -> Self {
        PropertyReport {
            name: property.name().to_string(),
            role: property.role().to_string(),
            value_type: property.descriptor().value_type().to_string(),
            markers: property
                .descriptor()
                .markers()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct DescribeReport<'a> {
    type_name: &'a TypeName,
    scheme: SchemeKind,
    properties: Vec<PropertyReport>,
    plan: &'a PropertyPlan,
    problems: &'a [ValidationProblem],
}

pub fn execute(args: DescribeArgs, config: &Config) -> Result<()> {
    let scheme = parse_scheme(&args.scheme)?;
    let catalog = load_catalog(&args.catalog)?;

    let requested = TypeName::from(args.type_name.as_str());
    if !catalog.contains(&catalog.canonicalize(&requested)) {
        bail!(
            "type `{}` is not declared in {}\n\
             help: Run `mooring validate {}` to list the declared types",
            requested,
            args.catalog.display(),
            args.catalog.display()
        );
    }

    let store = PropertyCapabilityStore::new(Arc::new(catalog), scheme.scheme())
        .with_memoization(config.memoization());
    let metadata = store.metadata(&requested);

    let mut plan = PropertyPlan::new();
    metadata.visit(&mut plan);
    let mut collector = ProblemCollector::for_root_type(metadata.type_name().clone());
    metadata.replay_problems(None, &mut collector);

    if args.json {
        let report = DescribeReport {
            type_name: metadata.type_name(),
            scheme,
            properties: metadata.properties().iter().map(PropertyReport::new).collect(),
            plan: &plan,
            problems: collector.problems(),
        };
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    println!("{} (scheme: {})", metadata.type_name(), scheme);
    if metadata.properties().is_empty() {
        println!("  no classified properties");
    }
    for property in metadata.properties() {
        let markers: Vec<String> = property
            .descriptor()
            .markers()
            .map(|marker| marker.to_string())
            .collect();
        println!(
            "  {}: {} {} [{}]",
            property.name(),
            property.role(),
            property.descriptor().value_type(),
            markers.join(", ")
        );
    }

    let file_inputs: Vec<_> = plan
        .properties
        .iter()
        .filter_map(|event| match event {
            PlannedProperty::InputFiles(input) => Some(input),
            _ => None,
        })
        .collect();
    if !file_inputs.is_empty() {
        println!();
        println!("Normalization:");
        for input in file_inputs {
            let spec = input.normalization();
            println!(
                "  {}: {} (directories: {:?}, line endings: {:?})",
                input.name,
                spec.normalizer.as_str(),
                spec.directory_sensitivity,
                spec.line_ending_sensitivity
            );
        }
    }

    if !collector.is_empty() {
        println!();
        println!("Problems:");
        for problem in collector.problems() {
            println!("  {}", problem.format_full(config.documentation_base()).replace('\n', "\n  "));
        }
    }

    Ok(())
}
