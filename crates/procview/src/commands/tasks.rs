//! Tasks command - list user tasks of a process instance.

use anyhow::Result;
use clap::Args;
use procview_client::UserTask;

use super::{Context, or_dash};

/// Arguments for the tasks command.
#[derive(Args, Debug)]
pub struct TasksArgs {
    /// Process instance ID
    pub id: String,
}

/// Run the tasks command.
pub async fn run(args: TasksArgs, ctx: &Context) -> Result<()> {
    let tasks = ctx.client.tasks().for_process(&args.id).await?;

    if ctx.json_output {
        return super::print_json(&tasks);
    }

    print_tasks(&tasks);
    Ok(())
}

pub fn print_tasks(tasks: &[UserTask]) {
    println!("Tasks ({})", tasks.len());
    for t in tasks {
        println!(
            "  {:<38} {:<24} {:<12} {}",
            t.id,
            or_dash(&t.name),
            or_dash(&t.assignee),
            or_dash(&t.created)
        );
    }
}
