pub mod llm;
pub mod store;

pub use llm::{LlmClient, LlmError};
pub use store::{JobStore, StoreError};
