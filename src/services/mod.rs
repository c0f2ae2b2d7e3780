pub mod assessment;
pub mod handoff;
pub mod photo_upload;
pub mod triage;
