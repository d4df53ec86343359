//! Project configuration - locating the Maven project and its test resources

use karabatch_common::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// A validated Maven project root and its resolved test-resource base.
///
/// Holding one of these proves configuration succeeded; catalog and runner
/// operations borrow it instead of consulting process-wide state.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
    resource_base: PathBuf,
}

impl ProjectContext {
    /// Validate a project root and resolve the resource base.
    ///
    /// The resource base is the first existing candidate among
    /// `{root}/src/test/resources` and `{root}` itself.
    pub fn configure(root: &Path) -> Result<Self> {
        if !root.exists() {
            return Err(Error::ProjectRootMissing(root.display().to_string()));
        }

        let candidates = [root.join("src").join("test").join("resources"), root.to_path_buf()];
        let resource_base = candidates
            .into_iter()
            .find(|p| p.exists())
            .ok_or_else(|| Error::ResourceBaseMissing(root.display().to_string()))?;

        info!("project configured: {}", root.display());
        info!("feature base path: {}", resource_base.display());

        Ok(Self {
            root: root.to_path_buf(),
            resource_base,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resource_base(&self) -> &Path {
        &self.resource_base
    }

    /// file:// URI of the conventional HTML report for a feature path.
    ///
    /// The report tool flattens the classpath-relative feature path into a
    /// single file name: slashes become dots and the `.feature` suffix is
    /// dropped.
    pub fn report_uri(&self, reports_dir: &str, feature: &str) -> String {
        let base = feature.strip_suffix(".feature").unwrap_or(feature).replace('/', ".");
        let path = self
            .root
            .join("target")
            .join(reports_dir)
            .join(format!("{base}.html"));
        format!("file://{}", path.display())
    }
}
