//! Variables command - list process or task variables.

use anyhow::Result;
use clap::Args;
use procview_client::Variable;

use super::{Context, or_dash};

/// Arguments for the variables command.
#[derive(Args, Debug)]
pub struct VariablesArgs {
    /// Process instance ID (or task ID with --task)
    pub id: String,

    /// Treat the ID as a user task
    #[arg(long)]
    pub task: bool,
}

/// Run the variables command.
pub async fn run(args: VariablesArgs, ctx: &Context) -> Result<()> {
    let variables = if args.task {
        ctx.client.variables().for_task(&args.id).await?
    } else {
        ctx.client.variables().for_process(&args.id).await?
    };

    if ctx.json_output {
        return super::print_json(&variables);
    }

    let scope = if args.task { "Task" } else { "Process" };
    print_variables(&format!("{} {} variables", scope, args.id), &variables);
    Ok(())
}

pub fn print_variables(title: &str, variables: &[Variable]) {
    println!("{} ({})", title, variables.len());
    for v in variables {
        println!("  {:<20} {:<10} {}", v.name, or_dash(&v.value_type), v.value);
    }
}
