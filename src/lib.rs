pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod prompts;
pub mod rag;
pub mod validation;


pub use config::AppConfig;
pub use errors::*;
pub use prompts::PromptStrategy;
pub use prompts::PromptType;
pub use rag::RagAnswer;
pub use rag::RagSession;
pub use validation::ResponseValidator;
pub use validation::ValidationOutcome;
pub use validation::ValidationReport;
