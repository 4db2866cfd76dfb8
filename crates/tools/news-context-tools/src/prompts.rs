//! The `analyze_news_context_prompt` prompt.

use crate::types::AnalyzePromptArgs;

pub const ANALYZE_NEWS_CONTEXT_PROMPT: &str = "analyze_news_context_prompt";
pub const ANALYZE_NEWS_CONTEXT_DESCRIPTION: &str =
    "Ask for a structured analysis of news search results";
pub const SEARCH_RESULTS_ARG: &str = "search_results";

pub const ANALYSIS_INSTRUCTION: &str = "\
Please analyze the following news articles and identify their context and relationships.

1. Common theme and main story: what core issue or event do these articles cover?
2. Five key keywords: which keywords come up repeatedly?
3. Perspective analysis: do publishers differ in viewpoint or emphasis?
4. Timeline: how has this issue developed, and how might it unfold next?
5. Social, economic, and political meaning: why does this matter in a wider context?

Base the analysis on the news information below:";

/// User messages for the prompt, in order: the instruction, then the
/// search results verbatim.
#[must_use]
pub fn analyze_news_context_prompt(args: &AnalyzePromptArgs) -> Vec<String> {
    vec![
        ANALYSIS_INSTRUCTION.to_string(),
        args.search_results.clone(),
    ]
}
