//! Structural indexing of TypeScript and JavaScript source trees
//!
//! Walks a directory, parses each supported file into a structural record
//! (imports, exports, functions, components, types, API routes) and
//! aggregates the records into one immutable snapshot.

mod ast_parser;
mod builder;
mod classify;
mod comments;
mod extractor;
mod file_info;
mod file_walker;
mod language;
mod summary;
mod syntax;

pub use ast_parser::AstParser;
pub use builder::{load_snapshot, persist_snapshot, BuildReport, IndexBuilder};
pub use classify::classify_path;
pub use extractor::{extract_file_record, is_component, relative_path};
pub use file_info::SourceFile;
pub use file_walker::FileWalker;
pub use language::SourceLanguage;
pub use summary::{render_summary, write_summary};
