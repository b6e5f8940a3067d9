use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use research_core::{AgentEvent, EventSink, ResearchError, ResearchSession};
use research_llm::OpenAICompatClient;
use research_loop::{run_until_idle, Collaborators, ResearchLoopConfig};
use research_search::serpapi::DEFAULT_SERPAPI_URL;
use research_search::SerpApiClient;

mod logging;
mod terminal;

use logging::init_logging;
use terminal::TerminalView;

#[derive(Parser, Debug, Clone)]
#[command(name = "deep-research")]
#[command(about = "Interactive deep research agent")]
#[command(version)]
struct Cli {
    /// SerpApi key. Without it every search returns an error message to the agent
    #[arg(long, env = "SERP_API_KEY", hide_env_values = true)]
    serp_api_key: Option<String>,

    /// Search endpoint
    #[arg(long, env = "SERP_API_URL", default_value = DEFAULT_SERPAPI_URL)]
    search_url: String,

    /// API key for the OpenAI-compatible decision/supervisor model
    #[arg(long, env = "ORACLE_API_KEY", hide_env_values = true)]
    oracle_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "ORACLE_BASE_URL", default_value = "https://api.openai.com/v1")]
    oracle_base_url: String,

    /// Model used for both decisions and supervision
    #[arg(long, env = "ORACLE_MODEL", default_value = "gpt-4o-mini")]
    oracle_model: String,

    /// Research steps before the agent is asked to wrap up
    #[arg(long, env = "MAX_STEPS", default_value_t = 4)]
    max_steps: usize,

    /// Enable debug mode
    #[arg(long, short, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.log_level.is_some() {
        env_logger::init();
    } else {
        init_logging(cli.debug);
    }

    let oracle_api_key = cli
        .oracle_api_key
        .clone()
        .ok_or_else(|| ResearchError::Config("ORACLE_API_KEY is not set".to_string()))?;

    log::info!("Starting deep research agent");
    log::info!("  Oracle: {} ({})", cli.oracle_base_url, cli.oracle_model);
    log::info!("  Search: {}", cli.search_url);
    log::info!("  Max steps: {}", cli.max_steps);

    let llm = Arc::new(
        OpenAICompatClient::new(oracle_api_key)
            .with_base_url(cli.oracle_base_url.clone())
            .with_model(cli.oracle_model.clone()),
    );
    let search = SerpApiClient::new(cli.serp_api_key.clone()).with_base_url(cli.search_url.clone());

    // Debug output goes to the same terminal; keep the screen instead of redrawing over it.
    let view = TerminalView::new(!cli.debug);

    if !search.has_api_key() {
        log::warn!("SERP_API_KEY is not set, searches will fail in-band");
        view.emit(AgentEvent::warning(
            "SERP_API_KEY not found. Search will return an error message.",
        ));
    }

    let collaborators = Collaborators {
        oracle: llm.clone(),
        supervisor: llm,
        search: Arc::new(search),
    };
    let config = ResearchLoopConfig {
        max_steps: cli.max_steps,
        ..Default::default()
    };

    let mut session = ResearchSession::start();
    log::info!("[{}] Session started", session.id);

    run_session(&mut session, &collaborators, &view, &config).await?;

    println!("\n{}", "👋 Goodbye!".cyan());
    Ok(())
}

async fn run_session(
    session: &mut ResearchSession,
    collaborators: &Collaborators,
    view: &TerminalView,
    config: &ResearchLoopConfig,
) -> Result<(), ResearchError> {
    loop {
        view.draw(session)?;

        let Some(query) = view.read_query()? else {
            break;
        };
        if query.is_empty() {
            continue;
        }

        view.clear_notices();
        session.submit_query(query);
        view.draw(session)?;

        let outcome = run_until_idle(session, collaborators, view, config, |session| {
            if let Err(error) = view.draw(session) {
                log::warn!("[{}] Failed to redraw transcript: {}", session.id, error);
            }
        })
        .await;

        log::debug!("[{}] Query finished: {:?}", session.id, outcome);
    }

    Ok(())
}
