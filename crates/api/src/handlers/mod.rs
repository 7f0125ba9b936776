pub mod assist;
pub mod project;
pub mod task;
