//! `mooring validate` command

use std::sync::Arc;

use anyhow::Result;

use crate::cli::ValidateArgs;
use crate::commands::{load_catalog, parse_scheme};
use mooring::util::diagnostic::{emit, Diagnostic};
use mooring::{Config, ProblemCollector, PropertyCapabilityStore};

pub fn execute(args: ValidateArgs, config: &Config, color: bool) -> Result<()> {
    let scheme = parse_scheme(&args.scheme)?;
    let catalog = load_catalog(&args.catalog)?;
    let types = catalog.type_names();

    let store = PropertyCapabilityStore::new(Arc::new(catalog), scheme.scheme())
        .with_memoization(config.memoization());
    let classified = store.warm(&types);

    let mut problems = 0;
    let mut failing_types = 0;
    for metadata in &classified {
        let mut collector = ProblemCollector::for_root_type(metadata.type_name().clone());
        metadata.replay_problems(None, &mut collector);
        if collector.is_empty() {
            continue;
        }

        failing_types += 1;
        problems += collector.len();
        for problem in collector.problems() {
            emit(
                &Diagnostic::for_problem(problem, config.documentation_base()),
                color,
            );
        }
    }

    if problems > 0 {
        eprintln!(
            "found {} problem(s) in {} of {} type(s)",
            problems,
            failing_types,
            types.len()
        );
        std::process::exit(1);
    }

    println!("{} type(s) valid for scheme {}", types.len(), scheme);
    Ok(())
}
