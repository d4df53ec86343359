//! Karabatch Runner
//!
//! Scenario discovery and sequential batch execution for Karate test suites
//! living inside Maven projects.
//!
//! The crate walks a project's test-resource tree for scenario directories
//! (`ScenarioCatalog`), runs a selected subset one Maven subprocess at a time
//! (`BatchRunner`), and tracks the single live process so a stop request can
//! kill it and cancel the rest of the batch (`ProcessSupervisor`).

pub mod batch;
pub mod catalog;
pub mod config;
pub mod project;
pub mod supervisor;

pub use batch::BatchRunner;
pub use catalog::ScenarioCatalog;
pub use config::{DiscoveryConfig, MavenConfig, RunnerConfig};
pub use project::ProjectContext;
pub use supervisor::{ProcessSupervisor, RunningProcess};
