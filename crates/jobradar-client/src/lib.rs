pub mod llm;
pub mod providers;
pub mod settings;

#[cfg(test)]
pub(crate) mod testutil;

pub use llm::OpenAiGenerator;
pub use providers::{
    AdzunaProvider, JSearchProvider, ProviderClient, ProviderKind, RemotiveProvider,
    TheMuseProvider,
};
pub use settings::{LlmSettings, ProviderSettings};
