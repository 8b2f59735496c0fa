pub mod client;
pub mod dto;
pub mod handler;
pub mod prompt;
pub mod service;
pub mod tool;

pub use client::{CompletionClient, CompletionClientRef, OpenRouterClient, ProviderError};
pub use dto::{ToneRequest, ToneResult, ToneStyle, UnknownToneStyle};
pub use prompt::{build_prompt, PromptTemplate};
pub use service::{ModelSelection, ToneService};
