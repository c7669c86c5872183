//! Events command - list events of a process instance or task.

use anyhow::Result;
use clap::{Args, ValueEnum};
use procview_client::EventScope;

use super::{Context, or_dash};

/// Event owner as given on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    Process,
    Task,
}

impl From<ScopeArg> for EventScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Process => EventScope::ProcessInstance,
            ScopeArg::Task => EventScope::Task,
        }
    }
}

/// Arguments for the events command.
#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Whether the ID is a process instance or a task
    #[arg(value_enum)]
    pub scope: ScopeArg,

    /// Process instance or task ID
    pub id: String,

    /// Only show events whose type or details contain this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Run the events command.
pub async fn run(args: EventsArgs, ctx: &Context) -> Result<()> {
    let scope = EventScope::from(args.scope);
    let events = ctx
        .client
        .events()
        .list(scope, &args.id, args.filter.as_deref())
        .await?;

    if ctx.json_output {
        return super::print_json(&events);
    }

    match &args.filter {
        Some(f) => println!("Events for {} {} matching '{}' ({})", scope, args.id, f, events.len()),
        None => println!("Events for {} {} ({})", scope, args.id, events.len()),
    }
    for e in &events {
        println!(
            "  {:<26} {:<20} {}",
            or_dash(&e.timestamp),
            e.event_type,
            e.details
        );
    }

    Ok(())
}
