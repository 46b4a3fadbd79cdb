//! Course recommendations for an employee's skill gaps and interests.

pub mod courses;
pub mod handlers;
pub mod prompts;
