//! Analysis sessions
//!
//! A session owns one output directory and writes the technical, poetic and
//! master reports of every file it processes, plus the session-level
//! comparison and summary.

pub mod config;
pub mod organizer;
pub mod pipeline;
pub mod summary;
pub mod synthesis;

pub use config::SessionConfig;
pub use organizer::SessionOrganizer;
pub use pipeline::SessionPipeline;
