pub mod arguments;
pub mod catalog;
pub mod options;
pub mod resolver;
pub mod solution;
pub mod version;
