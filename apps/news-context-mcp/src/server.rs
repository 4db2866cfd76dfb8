//! MCP server handler backed by [`NewsTools`].

use std::sync::Arc;

use news_context_tools::prompts::{
    ANALYZE_NEWS_CONTEXT_DESCRIPTION, ANALYZE_NEWS_CONTEXT_PROMPT, SEARCH_RESULTS_ARG,
    analyze_news_context_prompt,
};
use news_context_tools::types::AnalyzePromptArgs;
use news_context_tools::{NewsTool, NewsTools};
use rmcp::model as m;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use tracing::{debug, warn};

pub const SERVER_NAME: &str = "news-context-mcp";

const INSTRUCTIONS: &str = "Search Korean and international news by keyword. \
search_news lists headlines; search_news_with_content and compare_news_perspectives \
also include article bodies.";

pub struct NewsServer {
    tools: Arc<NewsTools>,
    name: String,
    version: String,
}

impl NewsServer {
    pub fn new(tools: Arc<NewsTools>) -> Self {
        Self {
            tools,
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Tool descriptors for `tools/list`, in catalogue order.
pub fn tool_descriptors() -> Vec<m::Tool> {
    NewsTool::ALL
        .into_iter()
        .map(|tool| {
            let schema = serde_json::to_value(tool.input_schema())
                .unwrap_or_else(|_| serde_json::json!({"type": "object"}));
            m::Tool {
                name: tool.name().into(),
                title: Some(tool.name().to_string()),
                description: Some(tool.description().into()),
                input_schema: Arc::new(schema.as_object().cloned().unwrap_or_default()),
                annotations: None,
                output_schema: None,
                icons: None,
                meta: None,
            }
        })
        .collect()
}

pub fn prompt_descriptor() -> m::Prompt {
    m::Prompt::new(
        ANALYZE_NEWS_CONTEXT_PROMPT,
        Some(ANALYZE_NEWS_CONTEXT_DESCRIPTION),
        Some(vec![m::PromptArgument {
            name: SEARCH_RESULTS_ARG.to_string(),
            title: None,
            description: Some("Output of a previous news search".to_string()),
            required: Some(true),
        }]),
    )
}

/// Builds the prompt for `prompts/get`.
pub fn render_prompt(
    name: &str,
    arguments: Option<m::JsonObject>,
) -> Result<m::GetPromptResult, m::ErrorData> {
    if name != ANALYZE_NEWS_CONTEXT_PROMPT {
        return Err(m::ErrorData::invalid_params(
            format!("Unknown prompt: {name}"),
            None,
        ));
    }

    let search_results = arguments
        .as_ref()
        .and_then(|args| args.get(SEARCH_RESULTS_ARG))
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| {
            m::ErrorData::invalid_params(
                format!("Missing required string argument '{SEARCH_RESULTS_ARG}'"),
                None,
            )
        })?
        .to_string();

    let messages = analyze_news_context_prompt(&AnalyzePromptArgs { search_results })
        .into_iter()
        .map(|text| m::PromptMessage::new_text(m::PromptMessageRole::User, text))
        .collect();

    Ok(m::GetPromptResult {
        description: Some(ANALYZE_NEWS_CONTEXT_DESCRIPTION.to_string()),
        messages,
    })
}

// Allow manual_async_fn because the trait signature uses `impl Future` return types
#[allow(clippy::manual_async_fn)]
impl ServerHandler for NewsServer {
    fn get_info(&self) -> m::ServerInfo {
        m::ServerInfo {
            server_info: m::Implementation {
                name: self.name.clone(),
                title: Some("News Context Analyzer".to_string()),
                version: self.version.clone(),
                website_url: None,
                icons: None,
            },
            capabilities: m::ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: tool_descriptors(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move {
            let args = serde_json::Value::Object(req.arguments.unwrap_or_default());
            match self.tools.dispatch_json(&req.name, args).await {
                Ok(text) => Ok(m::CallToolResult::success(vec![m::Content::text(text)])),
                Err(e) => {
                    warn!(tool = %req.name, error = %e, "Rejected tool call");
                    Ok(m::CallToolResult::error(vec![m::Content::text(
                        e.to_string(),
                    )]))
                }
            }
        }
    }

    fn ping(
        &self,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async { Ok(()) }
    }

    fn list_prompts(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListPromptsResult, m::ErrorData>> + Send + '_
    {
        async {
            Ok(m::ListPromptsResult {
                prompts: vec![prompt_descriptor()],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn get_prompt(
        &self,
        req: m::GetPromptRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::GetPromptResult, m::ErrorData>> + Send + '_
    {
        async move {
            debug!(prompt = %req.name, "Prompt requested");
            render_prompt(&req.name, req.arguments)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_context_tools::prompts::ANALYSIS_INSTRUCTION;

    #[test]
    fn lists_four_tools_with_object_schemas() {
        let tools = tool_descriptors();
        let names: Vec<&str> = tools.iter().map(|t| &*t.name).collect();
        assert_eq!(
            names,
            [
                "simple_test",
                "search_news",
                "search_news_with_content",
                "compare_news_perspectives"
            ]
        );
        for tool in &tools {
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&serde_json::json!("object"))
            );
            assert!(tool.description.is_some());
        }
    }

    #[test]
    fn prompt_requires_search_results() {
        let prompt = prompt_descriptor();
        assert_eq!(prompt.name, ANALYZE_NEWS_CONTEXT_PROMPT);
        let args = prompt.arguments.unwrap();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "search_results");
        assert_eq!(args[0].required, Some(true));
    }

    #[test]
    fn render_prompt_emits_instruction_then_results() {
        let mut args = m::JsonObject::new();
        args.insert(
            "search_results".into(),
            serde_json::json!("1. [Publisher] Daily"),
        );

        let result = render_prompt(ANALYZE_NEWS_CONTEXT_PROMPT, Some(args)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"]["text"], ANALYSIS_INSTRUCTION);
        assert_eq!(messages[1]["content"]["text"], "1. [Publisher] Daily");
    }

    #[test]
    fn render_prompt_rejects_bad_requests() {
        assert!(render_prompt("other_prompt", None).is_err());
        assert!(render_prompt(ANALYZE_NEWS_CONTEXT_PROMPT, None).is_err());

        let mut args = m::JsonObject::new();
        args.insert("search_results".into(), serde_json::json!(42));
        assert!(render_prompt(ANALYZE_NEWS_CONTEXT_PROMPT, Some(args)).is_err());
    }
}
