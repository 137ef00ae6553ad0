//! Selection heuristics and model-id resolution
//!
//! Two pure helpers used by the router: sniffing a task from raw prompt
//! text when neither an explicit model nor a task hint is given, and
//! splitting a model id into its provider and provider-local parts.

use super::types::TaskKind;

/// Prompt length (chars) above which an untagged prompt routes to the
/// RAG default
pub const RAG_PROMPT_THRESHOLD: usize = 4_000;

/// Markers that make an untagged prompt look like a coding request
const CODE_MARKERS: &[&str] = &[
    "```",
    "def ",
    "fn ",
    "function ",
    "class ",
    "import ",
    "#include",
    "SELECT ",
];

/// Providers the router can dispatch to directly
const PROVIDERS: &[&str] = &["openrouter", "deepseek", "xai", "anthropic"];

/// Sniff a task from raw prompt text
///
/// Ordered: code markers win over length, length over the chat default.
#[must_use]
pub fn sniff_task(prompt: &str) -> TaskKind {
    if CODE_MARKERS.iter().any(|marker| prompt.contains(marker)) {
        TaskKind::Code
    } else if prompt.len() > RAG_PROMPT_THRESHOLD {
        TaskKind::Rag
    } else {
        TaskKind::Chat
    }
}

/// Split a model id into `(provider, provider-local model)`
///
/// A known provider prefix is stripped (`"anthropic/claude-3-opus-20240229"`).
/// Vendor-qualified ids whose prefix is not a dispatchable provider
/// (`"meta-llama/llama-3.1-70b-instruct"`) belong to the gateway and pass
/// through to OpenRouter whole. Unprefixed ids are sniffed from the model
/// name.
#[must_use]
pub fn split_model_id(id: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = id.split_once('/') {
        if PROVIDERS.contains(&prefix) {
            return (prefix, rest);
        }
        return ("openrouter", id);
    }

    if id.starts_with("claude") {
        ("anthropic", id)
    } else if id.starts_with("grok") {
        ("xai", id)
    } else if id.starts_with("deepseek") {
        ("deepseek", id)
    } else {
        ("openrouter", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_code_fence() {
        assert_eq!(sniff_task("please fix\n```rust\nlet x = 1;\n```"), TaskKind::Code);
    }

    #[test]
    fn test_sniff_code_keyword() {
        assert_eq!(sniff_task("def add(a,b): return a+b"), TaskKind::Code);
        assert_eq!(sniff_task("fn main() {}"), TaskKind::Code);
    }

    #[test]
    fn test_sniff_long_prompt_is_rag() {
        let prompt = "lorem ipsum ".repeat(400);
        assert!(prompt.len() > RAG_PROMPT_THRESHOLD);
        assert_eq!(sniff_task(&prompt), TaskKind::Rag);
    }

    #[test]
    fn test_sniff_plain_prompt_is_chat() {
        assert_eq!(sniff_task("what's the weather like on Mars?"), TaskKind::Chat);
    }

    #[test]
    fn test_split_known_provider_prefix() {
        assert_eq!(
            split_model_id("anthropic/claude-3-opus-20240229"),
            ("anthropic", "claude-3-opus-20240229")
        );
        assert_eq!(split_model_id("xai/grok-3"), ("xai", "grok-3"));
        assert_eq!(
            split_model_id("deepseek/deepseek-chat"),
            ("deepseek", "deepseek-chat")
        );
    }

    #[test]
    fn test_split_gateway_prefix_keeps_nested_id() {
        assert_eq!(
            split_model_id("openrouter/meta-llama/llama-3.1-70b-instruct"),
            ("openrouter", "meta-llama/llama-3.1-70b-instruct")
        );
    }

    #[test]
    fn test_split_vendor_qualified_id_goes_to_gateway_whole() {
        assert_eq!(
            split_model_id("meta-llama/llama-3.1-70b-instruct"),
            ("openrouter", "meta-llama/llama-3.1-70b-instruct")
        );
    }

    #[test]
    fn test_split_unprefixed_id_is_sniffed() {
        assert_eq!(
            split_model_id("claude-3-5-sonnet-20241022"),
            ("anthropic", "claude-3-5-sonnet-20241022")
        );
        assert_eq!(split_model_id("grok-3-mini"), ("xai", "grok-3-mini"));
        assert_eq!(split_model_id("deepseek-coder"), ("deepseek", "deepseek-coder"));
        assert_eq!(split_model_id("gpt-4o-mini"), ("openrouter", "gpt-4o-mini"));
    }
}
