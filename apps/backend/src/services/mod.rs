pub mod catalog;
pub mod sessions;
pub mod watcher;
