//! Catalog Adapters.
//!
//! - `YamlTraitCatalog` - Trait catalog from YAML (file or built in)
//! - `StaticMentorSource` - Fixed mentor pool (built in or supplied)
//! - `YamlFileMentorSource` - Mentor pool re-read from a YAML file
//! - `remediation_from_file` - Remediation catalog override

mod yaml_mentors;
mod yaml_remediation;
mod yaml_traits;

pub use yaml_mentors::{parse_mentors, StaticMentorSource, YamlFileMentorSource};
pub use yaml_remediation::remediation_from_file;
pub use yaml_traits::YamlTraitCatalog;
