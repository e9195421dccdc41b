use std::path::Path;
use std::process;

use tracing::info;

use crate::commands::{print_json, read_case};
use crate::config::Config;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_distribute(case_path: &Path, config: &Config, output: OutputFormat, quiet: bool) {
    let doc = read_case(case_path, output, quiet);

    let report = match mirath_core::distribute_json(&doc, &config.policy(), &config.options()) {
        Ok(r) => r,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };
    info!(
        records = report.records().len(),
        warnings = report.warnings().len(),
        "distribution complete"
    );

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&report.to_json()),
        OutputFormat::Text => print!("{}", report.render_text(&config.currency)),
    }
}
