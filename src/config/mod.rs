pub mod exclusions;
pub mod project;

pub use exclusions::{default_exclusions, is_excluded};
pub use project::{find_project_root, ExtractorConfig, Keywords, PROJECT_MARKERS};
