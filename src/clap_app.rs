use anyhow::{anyhow, Context};
use bacli::errors::print_error;
use bacli::models::execution::Execution;
use bacli::models::executions::{ListJobExecutionsRequest, ListJobExecutionsResponse};
use bacli::models::state::ExecutionStateType;
use bacli::models::ApiModel;
use bacli::{agent, executions, BacalhauClient, BacalhauConfig};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::Parser;
use colored::Colorize;
use log::debug;
use std::process;
use std::str::FromStr;

use crate::clap_models::*;

pub async fn init_cli() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        print_error(format!("{:#}", err));
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => BacalhauConfig::from_file(path)?,
        None => BacalhauConfig::default(),
    }
    .with_overrides(cli.api_host, cli.api_port, cli.namespace);
    debug!("using API at {}", config.base_url());

    let client = BacalhauClient::from(config);

    match &cli.command {
        Commands::Agent { agent_command } => match agent_command {
            AgentCommands::Alive => {
                let alive = agent::is_alive(&client)
                    .await
                    .context("agent is not reachable")?;
                if alive.is_ready() {
                    println!("{:>8} {}", "✔".green(), "Agent is alive".green());
                } else {
                    return Err(anyhow!(
                        "agent answered with status {:?}",
                        alive.status.unwrap_or_default()
                    ));
                }
            }
            AgentCommands::Version => {
                let version = agent::get_version(&client)
                    .await
                    .context("unable to read the agent version")?;
                println!("{}", render(&version, cli.output)?);
            }
            AgentCommands::Node => {
                let node = agent::get_node(&client)
                    .await
                    .context("unable to read the agent node")?;
                println!("{}", render(&node, cli.output)?);
            }
            AgentCommands::Debug => {
                let debug_info = agent::get_debug(&client)
                    .await
                    .context("unable to read the agent debug information")?;
                println!("{}", render(&debug_info, cli.output)?);
            }
        },

        Commands::Job { job_command } => match job_command {
            JobCommands::Executions {
                job_id,
                limit,
                next_token,
                order_by,
                reverse,
                all,
                state,
                summary,
            } => {
                let state_filter = state
                    .as_deref()
                    .map(ExecutionStateType::from_str)
                    .transpose()
                    .map_err(|_| {
                        anyhow!(
                            "unknown execution state '{}'",
                            state.as_deref().unwrap_or_default()
                        )
                    })?;

                let request = ListJobExecutionsRequest {
                    namespace: client.config.namespace.clone(),
                    limit: *limit,
                    next_token: next_token.clone(),
                    order_by: order_by.clone(),
                    reverse: *reverse,
                };

                let page = if *all {
                    let items = executions::list_all_job_executions(&client, job_id, &request)
                        .await
                        .with_context(|| format!("unable to list executions of job {}", job_id))?;
                    ListJobExecutionsResponse::new().with_items(items)
                } else {
                    executions::list_job_executions(&client, job_id, &request)
                        .await
                        .with_context(|| format!("unable to list executions of job {}", job_id))?
                };

                let page = match state_filter {
                    Some(wanted) => filter_by_state(page, wanted),
                    None => page,
                };
                if *summary {
                    println!("{}", summarize(&page));
                } else {
                    println!("{}", render(&page, cli.output)?);
                }
            }
        },
    }
    Ok(())
}

/// Keeps only executions whose compute state is `wanted`. The page token is kept as is.
fn filter_by_state(
    page: ListJobExecutionsResponse,
    wanted: ExecutionStateType,
) -> ListJobExecutionsResponse {
    let next_token = page.next_token().map(str::to_owned);
    let (items, _) = page.into_parts();
    let items: Vec<Execution> = items
        .into_iter()
        .filter(|execution| {
            execution
                .compute_state
                .as_ref()
                .and_then(|state| state.state_type())
                == Some(wanted)
        })
        .collect();

    let filtered = ListJobExecutionsResponse::new().with_items(items);
    match next_token {
        Some(token) => filtered.with_next_token(token),
        None => filtered,
    }
}

/// One line per execution: ID, node, compute state, whether it is done, creation and
/// modification time and the state message. A hint to the following page closes the listing.
fn summarize(page: &ListJobExecutionsResponse) -> String {
    fn timestamp(time: Option<DateTime<Utc>>) -> String {
        time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "-".to_owned())
    }

    let mut lines = vec![format!(
        "{:<40} {:<12} {:<18} {:<5} {:<20} {:<20} {}",
        "ID", "NODE", "STATE", "DONE", "CREATED", "MODIFIED", "MESSAGE"
    )];
    for execution in page.items().unwrap_or_default() {
        let state = execution.compute_state.as_ref();
        let state_type = state
            .and_then(|s| s.state_type())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_owned());
        lines.push(format!(
            "{:<40} {:<12} {:<18} {:<5} {:<20} {:<20} {}",
            execution.id.as_deref().unwrap_or("-"),
            execution.node_id.as_deref().unwrap_or("-"),
            state_type,
            if execution.is_terminal() { "yes" } else { "no" },
            timestamp(execution.created_at()),
            timestamp(execution.modified_at()),
            state.and_then(|s| s.message()).unwrap_or_default(),
        ));
    }
    if let Some(token) = page.continuation() {
        lines.push(format!("next page: --next-token {}", token));
    }

    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the canonical mapping of a model in the requested format.
fn render<M: ApiModel>(model: &M, format: OutputFormat) -> anyhow::Result<String> {
    let map = model.to_map()?;
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&map)?,
        OutputFormat::Yaml => serde_yaml::to_string(&map)?,
    };
    Ok(rendered)
}
