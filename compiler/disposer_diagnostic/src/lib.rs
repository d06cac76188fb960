//! Diagnostic system for the Disposer generator.
//!
//! Every user-facing failure becomes a [`Diagnostic`]:
//! - A stable error code for searchability (`DISPOSER-0001`)
//! - A clear message (what went wrong)
//! - A primary label at the offending declaration (where it went wrong)
//! - Notes and suggestions (why, and how to fix it)
//!
//! Diagnostics are plain values. Hosts render them with one of the
//! [`emitter`] implementations or consume the fields directly.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
