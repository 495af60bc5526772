//! 候选域名来源实现

mod directory;
mod file;
mod registry;

pub use directory::{DirectorySeedSource, RepoClone};
pub use file::FileSeedSource;
pub use registry::{RegistryEntry, RegistrySeedSource, DEFAULT_REGISTRY_URL};
