//! Scenario discovery - walking the resource tree for runnable Karate scenarios

use crate::config::DiscoveryConfig;
use crate::project::ProjectContext;
use karabatch_common::{CategoryGroup, ScenarioEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Discovers scenario directories and their fixture files under a project's
/// resource base.
pub struct ScenarioCatalog<'a> {
    ctx: &'a ProjectContext,
    config: &'a DiscoveryConfig,
}

impl<'a> ScenarioCatalog<'a> {
    pub fn new(ctx: &'a ProjectContext, config: &'a DiscoveryConfig) -> Self {
        Self { ctx, config }
    }

    /// Walk the resource base and group discovered scenarios by category.
    ///
    /// Categories appear in first-seen order; scenarios keep walk order within
    /// their category. Unreadable subtrees are logged and skipped so a corrupt
    /// directory yields partial results instead of aborting the scan.
    pub fn scan(&self) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        self.walk(self.ctx.resource_base(), &mut groups);

        let total: usize = groups.iter().map(|g| g.scenarios.len()).sum();
        info!("discovered {} scenario(s) in {} categories", total, groups.len());
        groups
    }

    fn walk(&self, dir: &Path, groups: &mut Vec<CategoryGroup>) {
        for child in self.subdirectories(dir) {
            if self.is_scenario_root(&child) {
                // Leaf scenario; do not descend further
                if let Some(entry) = self.scenario_entry(&child) {
                    push_grouped(groups, entry);
                }
            } else {
                self.walk(&child, groups);
            }
        }
    }

    /// Immediate subdirectories in name order, skipping unreadable ones.
    fn subdirectories(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("skipping unreadable directory {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();
        dirs
    }

    /// A scenario root contains the nested marker directories.
    fn is_scenario_root(&self, dir: &Path) -> bool {
        let mut marker = dir.to_path_buf();
        for segment in &self.config.marker {
            marker.push(segment);
        }
        marker.exists()
    }

    /// Build the entry for one scenario root, or None when it holds no
    /// feature file at all.
    fn scenario_entry(&self, scenario_root: &Path) -> Option<ScenarioEntry> {
        let feature = match self.find_feature(scenario_root) {
            Some(path) => path,
            None => {
                debug!("no feature file under {}, skipping", scenario_root.display());
                return None;
            }
        };

        let scenario_name = scenario_root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (data_files, description_files) = self.collect_fixtures(scenario_root);

        Some(ScenarioEntry {
            feature: self.relative_unix(&feature),
            scenario_name,
            category: self.category_of(scenario_root),
            data_files,
            description_files,
        })
    }

    /// Locate the scenario's feature file: the conventional name under the
    /// marker path first, else the first `.feature` found by name-ordered
    /// recursive search.
    fn find_feature(&self, scenario_root: &Path) -> Option<PathBuf> {
        let mut conventional = scenario_root.to_path_buf();
        for segment in &self.config.marker {
            conventional.push(segment);
        }
        conventional.push(&self.config.feature_name);
        if conventional.is_file() {
            return Some(conventional);
        }

        WalkDir::new(scenario_root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|e| {
                e.file_type().is_file()
                    && e.path().extension().map(|ext| ext == "feature").unwrap_or(false)
            })
            .map(|e| e.into_path())
    }

    /// First path segment under the resource base when the scenario is
    /// nested, else the default category label.
    fn category_of(&self, scenario_root: &Path) -> String {
        let rel = scenario_root
            .strip_prefix(self.ctx.resource_base())
            .unwrap_or(scenario_root);
        let mut components = rel.components();
        let first = components.next();

        match (first, components.next()) {
            (Some(first), Some(_)) => first.as_os_str().to_string_lossy().to_string(),
            _ => self.config.default_category.clone(),
        }
    }

    /// Gather CSV/JSON fixtures from `data` and `description` directories
    /// anywhere under the scenario root.
    fn collect_fixtures(&self, scenario_root: &Path) -> (Vec<String>, Vec<String>) {
        let mut data_files = Vec::new();
        let mut description_files = Vec::new();
        self.search_fixtures(scenario_root, &mut data_files, &mut description_files);
        (data_files, description_files)
    }

    fn search_fixtures(&self, dir: &Path, data: &mut Vec<String>, description: &mut Vec<String>) {
        for child in self.subdirectories(dir) {
            let name = child
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();

            match name.as_str() {
                "data" => data.extend(self.fixture_files(&child)),
                "description" => description.extend(self.fixture_files(&child)),
                _ => self.search_fixtures(&child, data, description),
            }
        }
    }

    /// Immediate CSV/JSON files of a fixture directory, in name order.
    fn fixture_files(&self, dir: &Path) -> Vec<String> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("skipping unreadable fixture directory {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && has_fixture_extension(p))
            .collect();
        files.sort();
        files.iter().map(|p| self.relative_unix(p)).collect()
    }

    /// Path relative to the resource base with forward slashes.
    fn relative_unix(&self, path: &Path) -> String {
        let rel = path.strip_prefix(self.ctx.resource_base()).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn has_fixture_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "csv" || ext == "json"
        })
        .unwrap_or(false)
}

fn push_grouped(groups: &mut Vec<CategoryGroup>, entry: ScenarioEntry) {
    if let Some(pos) = groups.iter().position(|g| g.category == entry.category) {
        groups[pos].scenarios.push(entry);
    } else {
        groups.push(CategoryGroup {
            category: entry.category.clone(),
            scenarios: vec![entry],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_extension_is_case_insensitive() {
        assert!(has_fixture_extension(Path::new("in.csv")));
        assert!(has_fixture_extension(Path::new("in.CSV")));
        assert!(has_fixture_extension(Path::new("in.Json")));
        assert!(!has_fixture_extension(Path::new("in.txt")));
        assert!(!has_fixture_extension(Path::new("csv")));
    }

    #[test]
    fn grouping_preserves_first_seen_category_order() {
        let mut groups = Vec::new();
        for (category, name) in [("B", "one"), ("A", "two"), ("B", "three")] {
            push_grouped(
                &mut groups,
                ScenarioEntry {
                    feature: format!("{name}.feature"),
                    scenario_name: name.to_string(),
                    category: category.to_string(),
                    data_files: vec![],
                    description_files: vec![],
                },
            );
        }

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "B");
        assert_eq!(groups[0].scenarios.len(), 2);
        assert_eq!(groups[1].category, "A");
    }
}
