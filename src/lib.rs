pub mod annotations;
pub mod checker;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod search;
pub mod session;
pub mod span;

pub use annotations::{AnnotationStore, HIGHLIGHT, MISSPELLED};
pub use checker::dictionary::{Dictionary, KnownWords};
pub use checker::ignore::IgnoreSet;
pub use checker::tokenizer::{Token, Tokenizer, WordPolicy};
pub use checker::{compute_misspelled, SpellChecker};
pub use config::Config;
pub use document::Document;
pub use error::{Error, Result};
pub use search::{find_all, replace_all, SearchQuery};
pub use session::{EditSession, Mutation, SessionEvent, SessionState};
pub use span::{Position, TextSpan};
