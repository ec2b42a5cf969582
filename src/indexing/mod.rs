pub mod classifier;
pub mod error;
pub mod file_info;
pub mod project;
pub mod walker;

pub use classifier::{Classifier, file_type};
pub use error::{IndexError, IndexResult};
pub use file_info::{Classification, FileInfo, Importance, Purpose};
pub use project::{FileLeaf, IndexStats, ProjectIndex, ProjectIndexer, StructureNode};
pub use walker::FileWalker;
