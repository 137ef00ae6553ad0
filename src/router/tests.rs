//! Tests for router module

use super::*;
use crate::error::Error;
use std::collections::HashMap;
use std::sync::Arc;

fn test_config() -> RouterConfig {
    let mut default_model_by_task = HashMap::new();
    default_model_by_task.insert(TaskKind::Chat, "deepseek/deepseek-chat".to_string());
    default_model_by_task.insert(TaskKind::Code, "deepseek/deepseek-coder".to_string());
    default_model_by_task.insert(TaskKind::Reasoning, "deepseek/deepseek-reasoner".to_string());
    default_model_by_task.insert(TaskKind::Vision, "xai/grok-2-vision-1212".to_string());
    default_model_by_task.insert(TaskKind::Rag, "anthropic/claude-haiku-4-5-20251001".to_string());

    RouterConfig {
        default_model_by_task,
        fallback_chain: vec![
            "deepseek/deepseek-chat".to_string(),
            "anthropic/claude-haiku-4-5-20251001".to_string(),
        ],
        routing_strategy: RoutingStrategy::Auto,
    }
}

fn scripted_router() -> (
    ModelRouter,
    Arc<ScriptedProvider>,
    Arc<ScriptedProvider>,
    Arc<ScriptedProvider>,
) {
    let deepseek = Arc::new(ScriptedProvider::new("deepseek"));
    let anthropic = Arc::new(ScriptedProvider::new("anthropic"));
    let xai = Arc::new(ScriptedProvider::new("xai"));

    let mut router = ModelRouter::new(test_config());
    router.register("deepseek", deepseek.clone());
    router.register("anthropic", anthropic.clone());
    router.register("xai", xai.clone());

    (router, deepseek, anthropic, xai)
}

#[test]
fn test_explicit_model_wins_selection() {
    let (router, _, _, _) = scripted_router();
    let request = ModelRequest::new("hello").with_model("xai/grok-3");
    assert_eq!(router.select_model(&request), "xai/grok-3");
}

#[test]
fn test_task_hint_selects_configured_default() {
    let (router, _, _, _) = scripted_router();
    let request = ModelRequest::new("write a sort").with_task(TaskKind::Code);
    assert_eq!(router.select_model(&request), "deepseek/deepseek-coder");
}

#[test]
fn test_code_fence_heuristic_selects_code_default() {
    let (router, _, _, _) = scripted_router();
    let request = ModelRequest::new("what does this do?\n```py\nprint(1)\n```");
    assert_eq!(router.select_model(&request), "deepseek/deepseek-coder");
}

#[test]
fn test_code_keyword_heuristic_selects_code_default() {
    let (router, _, _, _) = scripted_router();
    let request = ModelRequest::new("def add(a,b): return a+b");
    assert_eq!(router.select_model(&request), "deepseek/deepseek-coder");
}

#[test]
fn test_long_prompt_selects_rag_default() {
    let (router, _, _, _) = scripted_router();
    let request = ModelRequest::new("context ".repeat(1000));
    assert_eq!(
        router.select_model(&request),
        "anthropic/claude-haiku-4-5-20251001"
    );
}

#[test]
fn test_plain_prompt_selects_chat_default() {
    let (router, _, _, _) = scripted_router();
    let request = ModelRequest::new("tell me a story");
    assert_eq!(router.select_model(&request), "deepseek/deepseek-chat");
}

#[tokio::test]
async fn test_explicit_model_is_attempted_before_fallback_chain() {
    let (router, deepseek, anthropic, xai) = scripted_router();
    xai.push_err(Error::Api("boom".to_string()));
    deepseek.push_err(Error::Api("boom".to_string()));
    anthropic.push_err(Error::Api("boom".to_string()));

    let request = ModelRequest::new("hello").with_model("xai/grok-3");
    let err = router.route(request).await.unwrap_err();

    let Error::Exhausted(attempts) = err else {
        panic!("expected Exhausted");
    };
    assert_eq!(attempts[0].model, "xai/grok-3");
    assert_eq!(xai.calls(), vec!["grok-3".to_string()]);
}

#[tokio::test]
async fn test_fallback_returns_first_success_unmodified() {
    let (router, deepseek, anthropic, xai) = scripted_router();
    // Chain: xai/grok-3 (explicit), deepseek/deepseek-chat, anthropic/claude-haiku...
    xai.push_err(Error::RateLimit);
    deepseek.push_err(Error::Api("overloaded".to_string()));
    anthropic.push_ok("third time lucky");

    let request = ModelRequest::new("hello").with_model("xai/grok-3");
    let response = router.route(request).await.unwrap();

    assert_eq!(response.content, "third time lucky");
    assert_eq!(response.model, "claude-haiku-4-5-20251001");
    // Earlier candidates were attempted exactly once
    assert_eq!(xai.calls().len(), 1);
    assert_eq!(deepseek.calls().len(), 1);
    assert_eq!(anthropic.calls().len(), 1);
}

#[tokio::test]
async fn test_exhaustion_surfaces_every_attempt() {
    let (router, deepseek, anthropic, _xai) = scripted_router();
    deepseek.push_err(Error::RateLimit);
    anthropic.push_err(Error::Api("model not found".to_string()));

    let request = ModelRequest::new("hello"); // chat default = deepseek/deepseek-chat
    let err = router.route(request).await.unwrap_err();

    let Error::Exhausted(attempts) = err else {
        panic!("expected Exhausted");
    };
    // Selected model duplicates the first chain entry, so two candidates total
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].model, "deepseek/deepseek-chat");
    assert_eq!(attempts[1].model, "anthropic/claude-haiku-4-5-20251001");
    assert!(matches!(*attempts[0].cause, Error::RateLimit));
}

#[tokio::test]
async fn test_already_tried_model_is_not_reattempted() {
    let (router, deepseek, anthropic, _xai) = scripted_router();
    // Explicit model also appears in the fallback chain
    anthropic.push_err(Error::Api("overloaded".to_string()));
    deepseek.push_ok("served by fallback");

    let request =
        ModelRequest::new("hello").with_model("anthropic/claude-haiku-4-5-20251001");
    let response = router.route(request).await.unwrap();

    assert_eq!(response.content, "served by fallback");
    // The anthropic model was attempted once despite appearing twice
    assert_eq!(anthropic.calls(), vec!["claude-haiku-4-5-20251001".to_string()]);
}

#[tokio::test]
async fn test_unregistered_provider_advances_fallback() {
    let deepseek = Arc::new(ScriptedProvider::new("deepseek"));
    let mut router = ModelRouter::new(test_config());
    router.register("deepseek", deepseek.clone());

    // xai is not registered; the walk moves on to the chain
    let request = ModelRequest::new("hello").with_model("xai/grok-3");
    let response = router.route(request).await.unwrap();

    assert_eq!(response.model, "deepseek-chat");
    let stats = router.tracker().usage_stats().await;
    assert_eq!(stats.successful_requests, 1);
}

#[tokio::test]
async fn test_route_tokens_satisfy_accounting_law() {
    let (router, _deepseek, _anthropic, _xai) = scripted_router();
    let response = router.route(ModelRequest::new("hello")).await.unwrap();
    assert_eq!(
        response.tokens.total_tokens,
        response.tokens.input_tokens + response.tokens.output_tokens
    );
}

#[tokio::test]
async fn test_route_records_usage() {
    let (router, deepseek, anthropic, _xai) = scripted_router();
    deepseek.push_err(Error::RateLimit);
    anthropic.push_ok("ok");

    router.route(ModelRequest::new("hello")).await.unwrap();

    let stats = router.tracker().usage_stats().await;
    assert_eq!(stats.total_requests, 2);
    assert_eq!(stats.successful_requests, 1);
    assert_eq!(stats.failed_requests, 1);
}

#[test]
fn test_available_models_are_provider_qualified() {
    let (router, _, _, _) = scripted_router();
    let models = router.available_models();
    assert!(models.contains(&"deepseek/scripted-model".to_string()));
    assert!(models.contains(&"xai/scripted-model".to_string()));
}

#[test]
fn test_update_config_replaces_chain() {
    let (mut router, _, _, _) = scripted_router();
    let config = test_config().with_fallback_chain(vec!["xai/grok-3-mini".to_string()]);
    router.update_config(config);
    assert_eq!(
        router.config().fallback_chain,
        vec!["xai/grok-3-mini".to_string()]
    );
}
