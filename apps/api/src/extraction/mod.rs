//! Job-description skill extraction: PDF or plain text in, required skills out.

pub mod handlers;
pub mod jd_extractor;
pub mod prompts;
