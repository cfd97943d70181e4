//! Service modules for quill-api.

pub mod access;
pub mod list_cache;
pub mod note_service;

pub use access::NoteAccessController;
pub use list_cache::RedisListCache;
pub use note_service::NoteService;
