//! News context analyzer: an MCP stdio server plus a small CLI over the same
//! tools.

mod server;

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use naver_news_async::NaverConfig;
use naver_news_async::config::{ENV_CLIENT_ID, ENV_CLIENT_SECRET};
use news_context_tools::{NewsSettings, NewsTool, NewsTools};
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::server::NewsServer;

const DEFAULT_LOG_FILTER: &str = "news_context_mcp=info,news_context_tools=info,naver_news_async=info";

#[derive(Parser, Debug)]
#[command(name = "news-context-mcp")]
#[command(about = "Keyword news search and article extraction via CLI or MCP", version)]
struct Args {
    /// Load environment variables from a .env file in the working directory
    #[arg(long, global = true)]
    dot_env: bool,

    /// Exit with an error instead of starting when API credentials are missing
    #[arg(long, global = true)]
    require_credentials: bool,

    /// List available tools and exit
    #[arg(long)]
    list_tools: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as an MCP server on stdio (default)
    Mcp,
    /// Search news from the command line
    Search {
        keyword: String,
        /// Include extracted article bodies
        #[arg(long)]
        content: bool,
        /// Include bodies and ask for a perspective comparison
        #[arg(long, conflicts_with = "content")]
        compare: bool,
    },
    /// Echo text back
    Echo { text: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let dot_env = args.dot_env.then(dotenvy::dotenv);
    init_tracing();
    match dot_env {
        Some(Ok(path)) => info!(path = %path.display(), "Loaded .env"),
        Some(Err(e)) => warn!(error = %e, "Could not load .env; continuing"),
        None => {}
    }

    // Install the rustls CryptoProvider before any HTTP clients are created.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    if args.list_tools {
        eprintln!("Available tools ({}):", NewsTool::ALL.len());
        for tool in NewsTool::ALL {
            eprintln!("  - {}", tool.name());
        }
        return Ok(());
    }

    let config = NaverConfig::new();
    if !config.has_credentials() {
        if args.require_credentials {
            bail!("{ENV_CLIENT_ID} and {ENV_CLIENT_SECRET} must be set");
        }
        warn!(
            "{ENV_CLIENT_ID}/{ENV_CLIENT_SECRET} are not set; news searches will report an \
             authentication error until they are"
        );
    }

    let tools = Arc::new(NewsTools::new(config, NewsSettings::from_env())?);

    match args.command.unwrap_or(Commands::Mcp) {
        Commands::Mcp => {
            info!(
                tools = ?NewsTool::ALL.map(NewsTool::name),
                max_concurrent_fetches = tools.settings().max_concurrent_fetches,
                "Starting {} {} on stdio",
                server::SERVER_NAME,
                env!("CARGO_PKG_VERSION")
            );
            let service = NewsServer::new(tools).serve(stdio()).await?;
            service.waiting().await?;
        }
        Commands::Search {
            keyword,
            content,
            compare,
        } => {
            let text = if compare {
                tools.compare_news_perspectives(&keyword).await
            } else if content {
                tools.search_news_with_content(&keyword).await
            } else {
                tools.search_news(&keyword).await
            };
            println!("{text}");
        }
        Commands::Echo { text } => println!("{}", tools.simple_test(&text)),
    }

    Ok(())
}

/// Logs always go to stderr; stdout carries the MCP protocol or CLI output.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_mcp() {
        let args = Args::try_parse_from(["news-context-mcp"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.dot_env);
    }

    #[test]
    fn search_flags_parse() {
        let args =
            Args::try_parse_from(["news-context-mcp", "search", "반도체", "--compare", "--dot-env"])
                .unwrap();
        assert!(args.dot_env);
        match args.command {
            Some(Commands::Search {
                keyword,
                content,
                compare,
            }) => {
                assert_eq!(keyword, "반도체");
                assert!(!content);
                assert!(compare);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn content_and_compare_conflict() {
        let res =
            Args::try_parse_from(["news-context-mcp", "search", "x", "--content", "--compare"]);
        assert!(res.is_err());
    }
}
