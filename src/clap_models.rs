use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[clap(
author,
version,
about,
long_about = None
)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// Path to JSON config file
    #[clap(short, long, value_parser, env = "BACALHAU_CLIENT_CONFIG")]
    pub config: Option<String>,

    /// Host of the Bacalhau API
    #[clap(long, value_parser, global = true, env = "BACALHAU_API_HOST")]
    pub api_host: Option<String>,

    /// Port of the Bacalhau API
    #[clap(long, value_parser, global = true, env = "BACALHAU_API_PORT")]
    pub api_port: Option<u16>,

    /// Namespace of the jobs
    #[clap(short, long, value_parser, global = true, env = "BACALHAU_NAMESPACE")]
    pub namespace: Option<String>,

    /// Output format
    #[clap(short, long, value_enum, global = true, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tools to query the agent the client is connected to
    Agent {
        #[clap(subcommand)]
        agent_command: AgentCommands,
    },

    /// Tools to inspect jobs
    Job {
        #[clap(subcommand)]
        job_command: JobCommands,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// Checks whether the agent is alive
    Alive,
    /// Prints the build version of the agent
    Version,
    /// Prints the state of the agent's node
    Node,
    /// Prints what the components of the agent's node are currently doing
    Debug,
}

#[derive(Subcommand)]
pub enum JobCommands {
    /// List the executions of a job
    Executions {
        /// ID of the job
        #[clap(value_parser)]
        job_id: String,

        /// Maximum number of executions per page
        #[clap(long, value_parser)]
        limit: Option<u32>,

        /// Token of the page to start at
        #[clap(long, value_parser)]
        next_token: Option<String>,

        /// Field to order the executions by
        #[clap(long, value_parser)]
        order_by: Option<String>,

        /// Reverse the order
        #[clap(long, action = ArgAction::SetTrue)]
        reverse: bool,

        /// Follow page tokens and print every execution of the job
        #[clap(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Only print executions in this compute state (e.g. Completed, Failed)
        #[clap(long, value_parser)]
        state: Option<String>,

        /// Print one line per execution instead of the full models
        #[clap(long, action = ArgAction::SetTrue)]
        summary: bool,
    },
}
