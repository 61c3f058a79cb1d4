pub mod directives;
pub mod schedule;
