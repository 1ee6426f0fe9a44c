//! mathesar CLI Entry Point
//!
//! Subcommands:
//! - `profile` - Stored connection profile management
//! - `schemas`, `tables`, `columns` - Navigation listings
//! - `records` - Enriched record listing with names instead of attnums
//! - `call` - Raw JSON-RPC passthrough
//!
//! All output to stdout is JSON-only. Logs go to stderr.

use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use mathesar_client::{
    list_profiles, resolve_with_profile, save_profile, Client, ClientError, ConfigLocation,
    ConfigOverrides, ErrorEnvelope, Metadata, RecordQuery, SortDirection, StoredProfile,
    SuccessEnvelope, Table,
};

/// mathesar - Typed client for the Mathesar JSON-RPC API
#[derive(Parser)]
#[command(name = "mathesar")]
#[command(about = "Query a Mathesar server by schema, table and column names")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Server base URL (falls back to MATHESAR_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Username (falls back to MATHESAR_USERNAME)
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password (falls back to MATHESAR_PASSWORD)
    #[arg(long, global = true)]
    password: Option<String>,

    /// Stored profile used for settings not given otherwise
    #[arg(long, global = true)]
    profile: Option<String>,
}

impl ConnectionArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Manage stored connection profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// List schemas of a database
    Schemas {
        /// Configured database id
        #[arg(long)]
        database: i64,
    },

    /// List tables of a schema
    Tables {
        #[arg(long)]
        database: i64,

        /// Schema name
        #[arg(long)]
        schema: String,
    },

    /// List columns of a table
    Columns {
        #[arg(long)]
        database: i64,

        #[arg(long)]
        schema: String,

        /// Table name
        #[arg(long)]
        table: String,
    },

    /// List records of a table, keyed by column name
    Records {
        #[arg(long)]
        database: i64,

        #[arg(long)]
        schema: String,

        #[arg(long)]
        table: String,

        #[arg(long)]
        limit: Option<i64>,

        #[arg(long)]
        offset: Option<i64>,

        /// Sort column, optionally suffixed with `:asc` or `:desc`
        #[arg(long, value_parser = parse_order)]
        order: Vec<(String, SortDirection)>,
    },

    /// Invoke any remote procedure and print its raw result
    Call {
        /// Procedure name, e.g. `tables.list`
        method: String,

        /// Parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Save a profile from --base-url and --username; prompts for the password
    Add {
        name: String,

        /// Read the password from this environment variable instead of storing it
        #[arg(long)]
        password_env: Option<String>,

        /// Save to the per-user file instead of `.mathesar/profiles.json`
        #[arg(long)]
        global: bool,
    },

    /// List stored profiles
    List,
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Profile { .. } => "profile",
            Self::Schemas { .. } => "schemas",
            Self::Tables { .. } => "tables",
            Self::Columns { .. } => "columns",
            Self::Records { .. } => "records",
            Self::Call { .. } => "call",
        }
    }
}

/// `column[:asc|desc]`; a suffix that is not a direction stays part of the column name
fn parse_order(raw: &str) -> std::result::Result<(String, SortDirection), String> {
    let split = raw
        .rsplit_once(':')
        .and_then(|(column, suffix)| suffix.parse::<SortDirection>().ok().map(|dir| (column, dir)));
    match split {
        Some(("", _)) => Err(format!("missing column name in '{raw}'")),
        Some((column, direction)) => Ok((column.to_string(), direction)),
        None => Ok((raw.to_string(), SortDirection::Asc)),
    }
}

/// Command output before it is wrapped in an envelope
struct Output {
    data: Value,
    rows: Option<usize>,
}

impl Output {
    fn new(data: impl Serialize) -> mathesar_client::Result<Self> {
        Ok(Self { data: to_value(data)?, rows: None })
    }

    fn rows(data: impl Serialize, rows: usize) -> mathesar_client::Result<Self> {
        Ok(Self { data: to_value(data)?, rows: Some(rows) })
    }
}

fn to_value(data: impl Serialize) -> mathesar_client::Result<Value> {
    serde_json::to_value(data)
        .map_err(|e| ClientError::invalid_input(format!("Could not serialize output: {e}")))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.name();
    let start = Instant::now();

    match run(cli).await {
        Ok(output) => {
            let elapsed = start.elapsed().as_millis() as u64;
            let meta = match output.rows {
                Some(rows) => Metadata::with_rows(elapsed, rows),
                None => Metadata::new(elapsed),
            };
            println!("{}", serde_json::to_string(&SuccessEnvelope::new(command, output.data, meta))?);
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string(&ErrorEnvelope::from_error(command, &err))?);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> mathesar_client::Result<Output> {
    let Cli { connection, command } = cli;

    match command {
        Commands::Profile { action } => run_profile(&connection, action),
        Commands::Schemas { database } => {
            let client = connect(&connection)?;
            let schemas = client.database(database).list_schemas().await?;
            Output::rows(&schemas, schemas.len())
        }
        Commands::Tables { database, schema } => {
            let client = connect(&connection)?;
            let tables = client.database(database).schema_by_name(&schema).await?.list_tables().await?;
            Output::rows(&tables, tables.len())
        }
        Commands::Columns { database, schema, table } => {
            let client = connect(&connection)?;
            let mut table = find_table(&client, database, &schema, &table).await?;
            let columns = table.columns(false).await?;
            Output::rows(&columns, columns.len())
        }
        Commands::Records { database, schema, table, limit, offset, order } => {
            let client = connect(&connection)?;
            let mut table = find_table(&client, database, &schema, &table).await?;
            let mut query = RecordQuery::new();
            if let Some(limit) = limit {
                query = query.limit(limit);
            }
            if let Some(offset) = offset {
                query = query.offset(offset);
            }
            for (column, direction) in order {
                query = query.order_by(column, direction);
            }
            let page = table.records_list(&query).await?;
            let rows = page.results.len();
            Output::rows(&page, rows)
        }
        Commands::Call { method, params } => {
            let client = connect(&connection)?;
            let params: Value = serde_json::from_str(&params)
                .map_err(|e| ClientError::invalid_input(format!("--params is not valid JSON: {e}")))?;
            Output::new(client.raw().call_value(&method, params).await?)
        }
    }
}

fn connect(connection: &ConnectionArgs) -> mathesar_client::Result<Client> {
    let config = resolve_with_profile(connection.overrides(), connection.profile.as_deref())?;
    Client::connect(&config)
}

async fn find_table(
    client: &Client,
    database: i64,
    schema: &str,
    table: &str,
) -> mathesar_client::Result<Table> {
    client.database(database).schema_by_name(schema).await?.table_by_name(table).await
}

fn run_profile(connection: &ConnectionArgs, action: ProfileAction) -> mathesar_client::Result<Output> {
    match action {
        ProfileAction::Add { name, password_env, global } => {
            let base_url = connection
                .base_url
                .clone()
                .ok_or_else(|| ClientError::invalid_input("profile add requires --base-url"))?;
            let username = connection
                .username
                .clone()
                .ok_or_else(|| ClientError::invalid_input("profile add requires --username"))?;

            let password = match (&password_env, &connection.password) {
                (Some(_), _) => None,
                (None, Some(password)) => Some(password.clone()),
                (None, None) => Some(
                    dialoguer::Password::new()
                        .with_prompt(format!("Password for {username}"))
                        .interact()
                        .map_err(|e| ClientError::invalid_input(format!("Could not read password: {e}")))?,
                ),
            };

            let location = if global { ConfigLocation::Global } else { ConfigLocation::Local };
            let profile = StoredProfile { base_url: base_url.clone(), username, password, password_env };
            save_profile(&name, profile, location)?;
            Output::new(serde_json::json!({ "name": name, "base_url": base_url }))
        }
        ProfileAction::List => {
            let profiles: Vec<Value> = list_profiles()?
                .into_iter()
                .map(|(name, base_url)| serde_json::json!({ "name": name, "base_url": base_url }))
                .collect();
            let rows = profiles.len();
            Output::rows(profiles, rows)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_defaults_to_ascending() {
        assert_eq!(parse_order("name").unwrap(), ("name".to_string(), SortDirection::Asc));
    }

    #[test]
    fn test_parse_order_with_direction() {
        assert_eq!(parse_order("created:desc").unwrap(), ("created".to_string(), SortDirection::Desc));
    }

    #[test]
    fn test_parse_order_rejects_empty_column() {
        assert!(parse_order(":asc").is_err());
    }

    #[test]
    fn test_parse_order_keeps_colon_in_column_name() {
        assert_eq!(parse_order("created:at").unwrap(), ("created:at".to_string(), SortDirection::Asc));
        assert_eq!(
            parse_order("created:at:DESC").unwrap(),
            ("created:at".to_string(), SortDirection::Desc)
        );
    }

    #[test]
    fn test_cli_parses_records_command() {
        let cli = Cli::parse_from([
            "mathesar", "records", "--database", "1", "--schema", "public", "--table", "users",
            "--order", "name:desc", "--limit", "5",
        ]);
        match cli.command {
            Commands::Records { database, limit, order, .. } => {
                assert_eq!(database, 1);
                assert_eq!(limit, Some(5));
                assert_eq!(order, vec![("name".to_string(), SortDirection::Desc)]);
            }
            _ => panic!("expected records command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mathesar", "schemas", "--database", "2", "--base-url", "http://x/"]);
        assert_eq!(cli.connection.base_url.as_deref(), Some("http://x/"));
        assert_eq!(cli.command.name(), "schemas");
    }
}
