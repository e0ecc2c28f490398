pub mod anthropic;
pub mod factory;
pub mod http_client;
pub mod ollama;
pub mod openai;
pub mod response;
pub mod scrub;
pub mod traits;

pub use factory::{ProviderEndpoint, ProviderKind, create_provider, resolve_api_key};
pub use http_client::build_provider_client;
pub use response::{ChatMessage, ChatReply, MessageRole};
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::{ChatOptions, ChatProvider};
