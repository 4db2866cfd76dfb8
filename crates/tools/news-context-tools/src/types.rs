//! Tool input types.

use schemars::JsonSchema;
use serde::Deserialize;

/// Input for `simple_test`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SimpleTestInput {
    /// Text to echo back
    pub text: String,
}

/// Input for the three search tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct KeywordInput {
    /// Search keyword, e.g. "반도체 수출" or "interest rates"
    pub keyword: String,
}

/// Arguments for the `analyze_news_context_prompt` prompt.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzePromptArgs {
    /// Output of a previous news search
    pub search_results: String,
}
