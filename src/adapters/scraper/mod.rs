pub mod client;
pub mod study_parser;
