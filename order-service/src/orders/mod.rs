//! Order engines

mod query;
mod workflow;

pub use query::OrderQuery;
pub use workflow::OrderWorkflow;
