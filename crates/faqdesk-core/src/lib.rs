pub mod envelope;
pub mod error;
pub mod frontmatter;
pub mod generate;
pub mod index;
pub mod request;
pub mod resolver;
pub mod store;
pub mod types;

pub use envelope::{AnswerSource, Envelope, DISCLAIMER};
pub use error::{FaqdeskError, Result};
pub use frontmatter::strip_front_matter;
pub use generate::{
    answer_prompt, GenerationParams, Generator, OllamaGenerator, DEFAULT_MAX_TOKENS,
    DEFAULT_OLLAMA_URL, DEFAULT_TEMPERATURE, EMPTY_COMPLETION, MODEL_UNAVAILABLE,
};
pub use index::FaqIndex;
pub use request::{AskRequest, RequestKind};
pub use resolver::EntryResolver;
pub use store::{from_address, ContentStore, FsStore, HttpStore};
pub use types::{Citation, IndexEntry, ResolvedEntry, Suggestion};
