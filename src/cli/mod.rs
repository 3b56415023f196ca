use crate::{config::Settings, server, Agent, FunctionFactory, NinjaClient};
use anyhow::{anyhow, Context};
use clap::{Arg, ArgMatches, Command};
use std::sync::Arc;
use tracing::{error, info};

fn command() -> Command {
    Command::new("ninja-agent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("LLM chat service answering finance questions with API Ninjas tools")
        .subcommand_required(true)
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("The chat model to use (or set OPENAI_MODEL)")
                .global(true),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("OpenAI API key (or set OPENAI_API_KEY env var)")
                .global(true),
        )
        .arg(
            Arg::new("ninjas-key")
                .long("ninjas-key")
                .value_name("KEY")
                .help("API Ninjas key (or set NINJAS_API_KEY env var)")
                .global(true),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("OpenAI-compatible base URL (or set OPENAI_BASE_URL)")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds")
                .global(true),
        )
        .arg(
            Arg::new("max-iterations")
                .short('i')
                .long("max-iterations")
                .value_name("COUNT")
                .help("Maximum model round trips per question")
                .global(true),
        )
        .subcommand(
            Command::new("serve").about("Run the HTTP chat server").arg(
                Arg::new("bind")
                    .short('b')
                    .long("bind")
                    .value_name("ADDR")
                    .help("Address to listen on (or set SERVER_ADDR)"),
            ),
        )
        .subcommand(
            Command::new("ask").about("Answer a single question").arg(
                Arg::new("question")
                    .help("The question to send to the agent")
                    .required(true)
                    .index(1),
            ),
        )
        .subcommand(Command::new("tools").about("Print the tool schemas sent to the model"))
        .subcommand(
            Command::new("call")
                .about("Invoke a single tool directly")
                .arg(
                    Arg::new("tool")
                        .help("Tool name, e.g. stock_price")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("arguments")
                        .help("JSON arguments, e.g. '{\"symbol\":\"AAPL\"}'")
                        .required(true)
                        .index(2),
                ),
        )
}

/// Resolve settings from `.env`, the environment and command-line overrides
fn resolve_settings(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let flag = |name: &str| matches.get_one::<String>(name).cloned();

    let settings = Settings::from_lookup(|key| {
        let overridden = match key {
            "OPENAI_API_KEY" => flag("api-key"),
            "NINJAS_API_KEY" => flag("ninjas-key"),
            "OPENAI_BASE_URL" => flag("base-url"),
            "OPENAI_MODEL" => flag("model"),
            "REQUEST_TIMEOUT_SECS" => flag("timeout"),
            "MAX_ITERATIONS" => flag("max-iterations"),
            _ => None,
        };
        overridden.or_else(|| std::env::var(key).ok())
    })?;

    Ok(settings)
}

/// CLI entry point for the ninja-agent binary
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        return Err(anyhow!("a subcommand is required"));
    };

    // schemas are static, no keys needed
    if name == "tools" {
        for tool in tool_schemas() {
            println!("{}", serde_json::to_string_pretty(&tool)?);
        }
        return Ok(());
    }

    let settings = resolve_settings(sub)?;

    match (name, sub) {
        ("serve", sub) => {
            let bind = sub
                .get_one::<String>("bind")
                .cloned()
                .unwrap_or_else(|| settings.server_addr.clone());
            serve(&settings, &bind).await
        }
        ("ask", sub) => {
            let question = sub
                .get_one::<String>("question")
                .ok_or_else(|| anyhow!("question is required"))?;
            ask(settings.build_agent(), question).await
        }
        ("call", sub) => {
            let tool = sub
                .get_one::<String>("tool")
                .ok_or_else(|| anyhow!("tool is required"))?;
            let raw = sub
                .get_one::<String>("arguments")
                .ok_or_else(|| anyhow!("arguments are required"))?;
            let arguments: serde_json::Value =
                serde_json::from_str(raw).context("arguments must be a JSON object")?;

            let agent = settings.build_agent();
            let result = agent
                .function_factory()
                .execute_function(tool, arguments)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        (other, _) => Err(anyhow!("unknown subcommand `{other}`")),
    }
}

/// OpenAI tool definitions, built without any credentials
fn tool_schemas() -> Vec<serde_json::Value> {
    FunctionFactory::with_ninja_tools(NinjaClient::new(String::new())).get_openai_tools()
}

async fn serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    info!("Using model: {}", settings.model);
    info!("Base URL: {}", settings.openai_base_url);
    info!("Request timeout: {}s", settings.timeout.as_secs());

    let handle = server::serve(Arc::new(settings.build_agent()), bind).await?;
    tokio::signal::ctrl_c().await?;
    handle.shutdown().await
}

async fn ask(agent: Agent, question: &str) -> anyhow::Result<()> {
    info!("Running agent with question: {}", question);

    match agent.run(question).await {
        Ok(answer) => {
            println!("{}", answer);
            Ok(())
        }
        Err(e) => {
            error!("Agent execution failed: {}", e);
            Err(e.into())
        }
    }
}
