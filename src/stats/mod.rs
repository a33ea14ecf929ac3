// Statistics tables: per-post features and per-author graph summaries.

pub mod author;
pub mod post;
