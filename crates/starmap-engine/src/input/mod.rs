pub mod hit_test;
pub mod queue;
