//! Subprocesses command.

use anyhow::Result;
use clap::Args;
use procview_client::Subprocess;

use super::{Context, or_dash};

/// Arguments for the subprocesses command.
#[derive(Args, Debug)]
pub struct SubprocessesArgs {
    /// Process instance ID
    pub id: String,
}

/// Run the subprocesses command.
pub async fn run(args: SubprocessesArgs, ctx: &Context) -> Result<()> {
    let subprocesses = ctx.client.subprocesses().for_process(&args.id).await?;

    if ctx.json_output {
        return super::print_json(&subprocesses);
    }

    print_subprocesses(&subprocesses);
    Ok(())
}

pub fn print_subprocesses(subprocesses: &[Subprocess]) {
    println!("Subprocesses ({})", subprocesses.len());
    for s in subprocesses {
        println!("  {:<38} {:<24} {}", s.id, or_dash(&s.name), or_dash(&s.status));
    }
}
