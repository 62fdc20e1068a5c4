pub mod observation;
pub mod query;
pub mod store;
