pub mod gateway;
pub mod openrouter;
pub mod prompts;

pub use gateway::{ChatGateway, ChatGatewayError, ChatGatewayFuture};
pub use openrouter::{OpenRouterConfig, OpenRouterGateway};
pub use prompts::SYSTEM_PROMPT;
