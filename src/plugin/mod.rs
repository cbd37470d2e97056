pub mod discovery;
pub mod summary;

pub use discovery::discover_plugins;
pub use summary::PluginSummary;
