//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use karabatch_common::{CategoryGroup, ExecutionRecord, RunSummary, ScenarioEntry};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

impl TableDisplay for ScenarioEntry {
    fn headers() -> Vec<&'static str> {
        vec!["Scenario", "Feature", "Data", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.scenario_name.clone(),
            self.feature.clone(),
            self.data_files.len().to_string(),
            self.description_files.len().to_string(),
        ]
    }
}

impl TableDisplay for ExecutionRecord {
    fn headers() -> Vec<&'static str> {
        vec!["#", "Feature", "Status", "Duration", "Detail"]
    }

    fn row(&self) -> Vec<String> {
        let status = if self.success {
            "passed".to_string()
        } else if self.was_cancelled() {
            "cancelled".to_string()
        } else if self.was_interrupted() {
            "interrupted".to_string()
        } else {
            "failed".to_string()
        };

        let detail = if self.success {
            self.report.clone().unwrap_or_default()
        } else {
            self.error
                .as_deref()
                .map(first_line)
                .unwrap_or_default()
        };

        vec![
            (self.original_index + 1).to_string(),
            self.feature.clone(),
            status,
            format!("{} ms", self.duration_ms),
            detail,
        ]
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("").to_string()
}

/// Print discovered scenarios grouped by category
pub fn print_catalog(groups: &[CategoryGroup], format: OutputFormat) {
    if groups.is_empty() {
        println!("No scenarios found.");
        return;
    }

    match format {
        OutputFormat::Table => {
            for group in groups {
                println!("{}", group.category);
                print_table(&group.scenarios);
            }
        }
        OutputFormat::Json => print_json(&groups),
        OutputFormat::Yaml => print_yaml(&groups),
        OutputFormat::Plain => {
            for group in groups {
                for entry in &group.scenarios {
                    println!("{}\t{}", group.category, entry.feature);
                }
            }
        }
    }
}

/// Print a finished batch
pub fn print_summary(summary: &RunSummary, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            print_table(&summary.records);
            println!(
                "{} passed, {} failed, {} cancelled ({} ms)",
                summary.passed, summary.failed, summary.cancelled, summary.duration_ms
            );
        }
        OutputFormat::Json => print_json(summary),
        OutputFormat::Yaml => print_yaml(summary),
        OutputFormat::Plain => {
            for record in &summary.records {
                let status = if record.success { "ok" } else { "failed" };
                println!("{}\t{}", record.feature, status);
            }
        }
    }
}

fn print_table<T: TableDisplay>(items: &[T]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(T::headers());
    for item in items {
        table.add_row(item.row());
    }

    println!("{table}");
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn print_yaml<T: Serialize>(value: &T) {
    println!("{}", serde_yaml::to_string(value).unwrap_or_default());
}
