mod ids;
mod project;

pub use ids::*;
pub use project::*;
