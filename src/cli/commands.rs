//! Command execution: import, resolve, print

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::Settings;
use crate::domain::{NodeId, Officemates, OfficematesLookup};
use crate::infrastructure::di::ServiceContainer;

/// Message printed when the queried id is not in the store.
pub const NOT_FOUND_MESSAGE: &str = "employee not found";

#[instrument(skip(cli), fields(employee_id = cli.employee_id))]
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?
        .with_overrides(cli.db.as_deref(), cli.data.as_deref());
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings)?;

    if cli.skip_import {
        debug!("import skipped");
    } else {
        let report = container
            .importer()
            .import_file(&container.settings.import.data_file)?;
        debug!(
            "imported {} nodes from {}",
            report.inserted,
            report.source.display()
        );
    }

    let resolver = container.resolver();
    let lookup = resolver.find_officemates(cli.employee_id)?;
    print_lookup(cli.employee_id, &lookup);

    if cli.tree {
        if let Some(office) = lookup.officemates().and_then(|o| o.office.as_ref()) {
            let tree = resolver.office_tree(office)?;
            output::info(&tree.to_tree_string(resolver.types()));
        }
    }
    Ok(())
}

fn print_lookup(employee_id: NodeId, lookup: &OfficematesLookup) {
    match lookup {
        OfficematesLookup::EmployeeNotFound => output::info(NOT_FOUND_MESSAGE),
        OfficematesLookup::Found(officemates) => match &officemates.office {
            Some(office) => output::officemates(&office.name, &join_names(officemates)),
            None => output::warning(&format!("employee {} has no enclosing office", employee_id)),
        },
    }
}

/// Officemate names, comma-delimited, in traversal order.
pub fn join_names(officemates: &Officemates) -> String {
    officemates.names().iter().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;

    #[test]
    fn given_officemates_when_joining_then_comma_delimited() {
        let officemates = Officemates {
            office: Some(Node::new(2, Some(1), "Office A", 1).unwrap()),
            employees: vec![
                Node::new(3, Some(2), "Alice", 3).unwrap(),
                Node::new(4, Some(2), "Bob", 3).unwrap(),
            ],
        };
        assert_eq!(join_names(&officemates), "Alice, Bob");
    }

    #[test]
    fn given_no_officemates_when_joining_then_empty() {
        assert_eq!(join_names(&Officemates::default()), "");
    }
}
