/*
 * Responsibility
 * - handler が受け取る extractor の re-export
 */
mod auth_ctx;
mod path_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use path_id::{PathId, parse_id};
