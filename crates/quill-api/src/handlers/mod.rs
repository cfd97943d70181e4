//! HTTP handler modules for quill-api.

pub mod notes;
