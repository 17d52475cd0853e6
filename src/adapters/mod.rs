// Adapters layer: concrete implementations of the domain ports.

pub mod container;
pub mod dataset;

pub use container::CliContainerExecutor;
pub use dataset::TableDataset;
