//! Static registry of known LLM providers.

/// How the API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `x-api-key: <key>` plus `anthropic-version` (Anthropic).
    XApiKey,
    /// No auth (local servers).
    None,
}

/// Wire dialect of the chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `POST /chat/completions`, `choices[0].message` responses.
    OpenAi,
    /// `POST /messages`, content-block responses.
    Anthropic,
}

/// Everything needed to talk to one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderSpec {
    pub name: &'static str,
    pub base_url: &'static str,
    pub chat_path: &'static str,
    pub auth_style: AuthStyle,
    pub dialect: Dialect,
    /// Environment variables checked for the API key, in order.
    pub env_keys: &'static [&'static str],
}

const PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "openai",
        base_url: "https://api.openai.com/v1",
        chat_path: "/chat/completions",
        auth_style: AuthStyle::Bearer,
        dialect: Dialect::OpenAi,
        env_keys: &["OPENAI_API_KEY"],
    },
    ProviderSpec {
        name: "anthropic",
        base_url: "https://api.anthropic.com/v1",
        chat_path: "/messages",
        auth_style: AuthStyle::XApiKey,
        dialect: Dialect::Anthropic,
        env_keys: &["ANTHROPIC_API_KEY"],
    },
    ProviderSpec {
        name: "ollama",
        base_url: "http://localhost:11434/v1",
        chat_path: "/chat/completions",
        auth_style: AuthStyle::None,
        dialect: Dialect::OpenAi,
        env_keys: &[],
    },
];

/// Look up a provider spec by name.
pub fn lookup(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|p| p.name == name)
}

/// All registered provider names.
pub fn all_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.name).collect()
}
