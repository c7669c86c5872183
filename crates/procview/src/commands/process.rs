//! Process command - show a process instance card.

use anyhow::Result;
use clap::Args;
use procview_client::{ProcessInstance, Subprocess, UserTask, Variable};

use super::{Context, or_dash};

/// Arguments for the process command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Process instance ID
    pub id: String,
}

#[derive(serde::Serialize)]
struct ProcessView {
    instance: ProcessInstance,
    variables: Vec<Variable>,
    tasks: Vec<UserTask>,
    subprocesses: Vec<Subprocess>,
}

/// Run the process command.
pub async fn run(args: ProcessArgs, ctx: &Context) -> Result<()> {
    let Some(instance) = ctx.client.process_instances().get(&args.id).await? else {
        if ctx.json_output {
            return super::print_json(&serde_json::Value::Null);
        }
        println!("Process instance {} not found", args.id);
        return Ok(());
    };

    // Fragments load concurrently and share the cached token.
    let (variables_api, tasks_api, subprocesses_api) = (
        ctx.client.variables(),
        ctx.client.tasks(),
        ctx.client.subprocesses(),
    );
    let (variables, tasks, subprocesses) = tokio::try_join!(
        variables_api.for_process(&args.id),
        tasks_api.for_process(&args.id),
        subprocesses_api.for_process(&args.id),
    )?;

    let view = ProcessView {
        instance,
        variables,
        tasks,
        subprocesses,
    };

    if ctx.json_output {
        return super::print_json(&view);
    }

    let p = &view.instance;
    println!("Process {}", p.id);
    println!("{}", "-".repeat(8 + p.id.len()));
    println!("Name:         {}", or_dash(&p.name));
    println!("Status:       {}", or_dash(&p.status));
    println!("Started:      {}", or_dash(&p.start_time));
    println!("Business key: {}", or_dash(&p.business_key));

    println!();
    super::variables::print_variables("Variables", &view.variables);
    println!();
    super::tasks::print_tasks(&view.tasks);
    println!();
    super::subprocesses::print_subprocesses(&view.subprocesses);

    Ok(())
}
