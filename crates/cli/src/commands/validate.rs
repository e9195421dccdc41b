use std::path::Path;
use std::process;

use mirath_core::Case;

use crate::commands::{print_json, read_case};
use crate::config::Config;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_validate(case_path: &Path, config: &Config, output: OutputFormat, quiet: bool) {
    let doc = read_case(case_path, output, quiet);

    let case = match Case::from_json(&doc, &config.policy()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let value = serde_json::to_value(&case)
                .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }));
            print_json(&serde_json::json!({ "valid": true, "case": value }));
        }
        OutputFormat::Text => {
            println!(
                "{}: valid ({} heir entr{})",
                case_path.display(),
                case.entries().len(),
                if case.entries().len() == 1 { "y" } else { "ies" }
            );
            for entry in case.entries() {
                println!(
                    "  #{} {} x{}",
                    entry.id.0,
                    entry.relation.label(config.language),
                    entry.count
                );
            }
        }
    }
}
