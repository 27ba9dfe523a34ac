use anyhow::Result;
use comfy_table::Table;
use rdc_cli::pipeline::{self, CleanOutcome, CleanRequest};
use rdc_model::{CleaningOptions, TableKind, TableSchema};

use crate::cli::CleanArgs;
use crate::summary::apply_table_style;

pub fn run_tables() {
    let options = CleaningOptions::default();
    let mut table = Table::new();
    table.set_header(vec!["Table", "Source", "Destination", "Field contracts"]);
    apply_table_style(&mut table);
    for kind in TableKind::ALL {
        let schema = TableSchema::for_table(kind, &options);
        let mut contracts: Vec<String> = schema
            .fields
            .iter()
            .map(|field| {
                let rules: Vec<String> = field.rules.iter().map(ToString::to_string).collect();
                format!(
                    "{} ({}): {}",
                    field.name,
                    field.target.display_name(),
                    rules.join("; ")
                )
            })
            .collect();
        if !schema.dropped_columns.is_empty() {
            contracts.push(format!("drop: {}", schema.dropped_columns.join(", ")));
        }
        table.add_row(vec![
            kind.as_str().to_string(),
            kind.source().to_string(),
            kind.destination().to_string(),
            contracts.join("\n"),
        ]);
    }
    println!("{table}");
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanOutcome> {
    let request = CleanRequest {
        table: args.table.clone(),
        input: args.input.clone(),
        output: args.output.clone(),
        config: args.config.clone(),
        dry_run: args.dry_run,
    };
    pipeline::run_clean(&request)
}
