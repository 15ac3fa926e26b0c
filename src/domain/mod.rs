pub mod announcement;
pub mod dedup;
pub mod study;
