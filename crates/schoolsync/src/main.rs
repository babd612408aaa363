mod seed_data;
mod storage;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dialoguer::Confirm;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schoolsync_core::reconcile::Reconciler;
use schoolsync_core::storage::{ItemKey, ScalarValue, StorageItem, StoreError, TableStore};

use crate::storage::dynamodb::{
    create_client, list_tables, table_exists, AwsConfig, DynamoTableStore,
};

/// Schoolsync - seed and inspect the school management table
#[derive(Parser, Debug)]
#[command(name = "schoolsync")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the table contents with the configured seed set.
    Seed(SeedCommand),

    /// Fetch one record and print its field values.
    Inspect(InspectCommand),

    /// List the tables visible to the configured endpoint and region.
    Tables,
}

/// Replace the table contents with the configured seed set.
#[derive(Args, Debug)]
#[command(long_about = "Replace the entire table contents with the configured seed set.

The run scans and deletes every existing item, then projects and writes the
seed entities, one bulk request of at most 25 operations at a time. This is
a destructive development-mode operation: do not run it against a table
with concurrent writers.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to ap-southeast-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
struct SeedCommand {
    /// Table name to reconcile.
    #[arg(long, env = "TABLE_NAME", default_value = "student-management")]
    table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    force: bool,
}

/// Fetch one record and print its field values.
#[derive(Args, Debug)]
#[command(long_about = "Fetch one record by key and print its field values.

Flags role-casing drift: the stored role_name must be lowercase and the
secondary partition key must carry the uppercase form, otherwise role-based
lookups silently miss the record.")]
struct InspectCommand {
    /// Partition key of the record, e.g. USER#SE182088.
    #[arg(value_name = "PARTITION_KEY")]
    partition_key: String,

    /// Sort key of the record.
    #[arg(long, default_value = "PROFILE")]
    sort_key: String,

    /// Table name to read from.
    #[arg(long, env = "TABLE_NAME", default_value = "student-management")]
    table_name: String,

    /// Print the record as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schoolsync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Command::Seed(cmd) => run_seed(cmd).await,
        Command::Inspect(cmd) => run_inspect(cmd).await,
        Command::Tables => run_tables().await,
    }
}

async fn run_seed(cmd: SeedCommand) -> Result<()> {
    let aws_config = AwsConfig::default();
    println!("Target: {}", aws_config.target_display());
    println!("Table:  {}", cmd.table_name);

    let client = create_client(&aws_config).await;
    if !table_exists(&client, &cmd.table_name).await? {
        return Err(StoreError::TableNotFound {
            table_name: cmd.table_name,
        }
        .into());
    }

    let seed = seed_data::seed_set();
    println!(
        "Seed set: {} users, {} subjects, {} classes, {} enrollments",
        seed.users.len(),
        seed.subjects.len(),
        seed.classes.len(),
        seed.enrollments.len(),
    );

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Replace the entire table contents? ALL EXISTING DATA WILL BE LOST")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let store = DynamoTableStore::new(client, cmd.table_name);
    tracing::info!(table = store.table_name(), "starting reconciliation");
    let report = Reconciler::new(&store).run(&seed).await?;

    println!(
        "Success: {} items deleted, {} items written.",
        report.deleted, report.written
    );
    Ok(())
}

async fn run_inspect(cmd: InspectCommand) -> Result<()> {
    let aws_config = AwsConfig::default();
    let client = create_client(&aws_config).await;

    let key = ItemKey::new(cmd.partition_key, cmd.sort_key);
    let store = DynamoTableStore::new(client, cmd.table_name);

    let Some(item) = store.get_item(&key).await? else {
        println!(
            "No record found for {} / {}",
            key.partition_key, key.sort_key
        );
        return Ok(());
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    print_record(&item);
    Ok(())
}

async fn run_tables() -> Result<()> {
    let aws_config = AwsConfig::default();
    println!("Target: {}", aws_config.target_display());

    let client = create_client(&aws_config).await;
    let names = list_tables(&client).await?;

    if names.is_empty() {
        println!("No tables found.");
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

fn print_record(item: &StorageItem) {
    println!("{} / {}", item.key.partition_key, item.key.sort_key);
    if let Some(index_key) = &item.index_key {
        println!(
            "index: {} / {}",
            index_key.partition_key, index_key.sort_key
        );
    }
    for (name, value) in &item.attributes {
        println!("  {name} = {}", format_scalar(value));
    }

    // Role-casing drift silently breaks role-based lookups; flag it here.
    if let Some(role) = item.str_attr("role_name") {
        if role.chars().any(|c| c.is_ascii_uppercase()) {
            println!(
                "warning: role_name '{role}' is not lowercase; role lookups expect lowercase values"
            );
        }
        if let Some(index_key) = &item.index_key {
            let expected = format!("ROLE#{}", role.to_uppercase());
            if index_key.partition_key != expected {
                println!(
                    "warning: GSI1PK '{}' does not match expected '{}'",
                    index_key.partition_key, expected
                );
            }
        }
    }
}

fn format_scalar(value: &ScalarValue) -> String {
    match value {
        ScalarValue::S(s) => format!("\"{s}\""),
        ScalarValue::N(n) => n.to_string(),
        ScalarValue::Bool(b) => b.to_string(),
    }
}
