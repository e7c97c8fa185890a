//! Thin sample CLI over `vk-core`.
//!
//! Errors print and exit non-zero here, in the binary; the library itself
//! never terminates the process.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vk_core::{Api, Auth, Permission, Scope};

#[derive(Parser)]
#[command(name = "vk", about = "Sample client for the VK API", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List communities a user is a member of.
    UserGroups {
        /// API access token.
        #[arg(long, env = "VK_TOKEN")]
        token: String,
        /// Numeric user id.
        #[arg(long)]
        user_id: i64,
    },
    /// List members of a community, paging server-side in one batch call.
    GroupMembers {
        /// API access token.
        #[arg(long, env = "VK_TOKEN")]
        token: String,
        /// Numeric community id.
        #[arg(long)]
        group_id: i64,
        /// Extra profile fields to request.
        #[arg(long, default_value = "sex")]
        fields: String,
    },
    /// Print the browser authorization URL for an application.
    AuthUrl {
        /// Application (client) id.
        #[arg(long)]
        client_id: i64,
        /// Requested permissions, comma separated (e.g. "offline,groups").
        #[arg(long, value_delimiter = ',')]
        scope: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::UserGroups { token, user_id } => {
            let api = Api::new(token);
            let groups = api.groups.get_for_user(user_id).context("groups.get failed")?;
            for group in groups {
                println!("{group}");
            }
        }
        Command::GroupMembers { token, group_id, fields } => {
            let api = Api::new(token);
            let members = api
                .groups
                .get_members_batch(group_id, 0, &fields)
                .context("batch groups.getMembers failed")?;
            println!("{} members", members.count);
            for user in members.items {
                println!("{user}");
            }
        }
        Command::AuthUrl { client_id, scope } => {
            let scope: Scope = scope
                .iter()
                .map(|name| name.parse::<Permission>().map_err(anyhow::Error::msg))
                .collect::<Result<_, _>>()?;
            println!("{}", Auth { client_id, scope, ..Auth::default() }.url());
        }
    }
    Ok(())
}
