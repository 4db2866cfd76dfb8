//! Tool catalogue and JSON dispatch.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use schemars::{Schema, schema_for};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::NewsTools;
use crate::messages;
use crate::types::{KeywordInput, SimpleTestInput};

/// The tools this crate exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsTool {
    SimpleTest,
    SearchNews,
    SearchNewsWithContent,
    CompareNewsPerspectives,
}

impl NewsTool {
    pub const ALL: [Self; 4] = [
        Self::SimpleTest,
        Self::SearchNews,
        Self::SearchNewsWithContent,
        Self::CompareNewsPerspectives,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SimpleTest => "simple_test",
            Self::SearchNews => "search_news",
            Self::SearchNewsWithContent => "search_news_with_content",
            Self::CompareNewsPerspectives => "compare_news_perspectives",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SimpleTest => "Echo the given text back. Useful for checking the connection.",
            Self::SearchNews => {
                "Search news by keyword and list publisher, title, time and link for up to 20 articles, followed by a request to analyze their context."
            }
            Self::SearchNewsWithContent => {
                "Search news by keyword and include each article's extracted body (up to 1000 characters) for deeper analysis."
            }
            Self::CompareNewsPerspectives => {
                "Search news by keyword with article bodies and ask for a comparison of how each publisher frames the story."
            }
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// JSON schema for the tool's arguments.
    #[must_use]
    pub fn input_schema(self) -> Schema {
        match self {
            Self::SimpleTest => schema_for!(SimpleTestInput),
            Self::SearchNews | Self::SearchNewsWithContent | Self::CompareNewsPerspectives => {
                schema_for!(KeywordInput)
            }
        }
    }
}

/// Protocol-level failures. Search problems are not errors here; they come
/// back as ordinary result text.
#[derive(Debug, Error)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },
}

impl NewsTools {
    /// Runs the tool called `name` with JSON `args` and returns its text.
    ///
    /// A panic inside a tool is caught here and reported as the generic
    /// unexpected-error message.
    ///
    /// # Errors
    ///
    /// Returns [`ToolCallError`] for an unknown tool name or arguments that do
    /// not match the tool's input type.
    pub async fn dispatch_json(&self, name: &str, args: Value) -> Result<String, ToolCallError> {
        let tool =
            NewsTool::from_name(name).ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;
        info!(tool = tool.name(), "Tool called");

        match AssertUnwindSafe(self.call(tool, args)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let detail = panic_detail(panic.as_ref());
                error!(tool = tool.name(), detail = %detail, "Tool panicked");
                Ok(messages::unexpected(&detail))
            }
        }
    }

    async fn call(&self, tool: NewsTool, args: Value) -> Result<String, ToolCallError> {
        Ok(match tool {
            NewsTool::SimpleTest => {
                let input: SimpleTestInput = decode(tool, args)?;
                self.simple_test(&input.text)
            }
            NewsTool::SearchNews => {
                let input: KeywordInput = decode(tool, args)?;
                self.search_news(&input.keyword).await
            }
            NewsTool::SearchNewsWithContent => {
                let input: KeywordInput = decode(tool, args)?;
                self.search_news_with_content(&input.keyword).await
            }
            NewsTool::CompareNewsPerspectives => {
                let input: KeywordInput = decode(tool, args)?;
                self.compare_news_perspectives(&input.keyword).await
            }
        })
    }
}

fn decode<T: DeserializeOwned>(tool: NewsTool, args: Value) -> Result<T, ToolCallError> {
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ToolCallError::InvalidArguments {
        tool: tool.name(),
        reason: e.to_string(),
    })
}

fn panic_detail(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for tool in NewsTool::ALL {
            assert_eq!(NewsTool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(NewsTool::from_name("search"), None);
    }

    #[test]
    fn schemas_require_their_field() {
        let schema = serde_json::to_value(NewsTool::SearchNews.input_schema()).unwrap();
        assert_eq!(schema["required"], serde_json::json!(["keyword"]));
        assert_eq!(schema["properties"]["keyword"]["type"], "string");

        let schema = serde_json::to_value(NewsTool::SimpleTest.input_schema()).unwrap();
        assert_eq!(schema["required"], serde_json::json!(["text"]));
    }

    #[test]
    fn panic_detail_reads_common_payloads() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_detail(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_detail(boxed.as_ref()), "bang");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_detail(boxed.as_ref()), "unknown panic");
    }
}
