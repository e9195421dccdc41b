use mirath_core::registry::relations;
use mirath_core::Kinship;

use crate::commands::print_json;
use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_relations(config: &Config, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = relations()
                .map(|r| {
                    serde_json::json!({
                        "code": r.code,
                        "sex": r.sex,
                        "kinship": r.kinship,
                        "label_en": r.label_en,
                        "label_ar": r.label_ar,
                        "max_count": r.max_count,
                    })
                })
                .collect();
            print_json(&serde_json::Value::Array(rows));
        }
        OutputFormat::Text => {
            for kinship in Kinship::ALL {
                println!("{}:", kinship.label(config.language));
                for r in relations().filter(|r| r.kinship == kinship) {
                    println!("  {:<14} {}", r.code, r.label(config.language));
                }
            }
        }
    }
}
