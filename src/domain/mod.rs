pub mod contact;
pub mod models;
pub mod schedule;
pub mod scores;
pub mod submission;
