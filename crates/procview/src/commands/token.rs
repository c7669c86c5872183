//! Token command - acquire an access token and show its expiry.

use anyhow::Result;
use clap::Args;

use super::Context;

/// Arguments for the token command.
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Print the full access token instead of a masked prefix
    #[arg(long)]
    pub reveal: bool,
}

/// Run the token command.
pub async fn run(args: TokenArgs, ctx: &Context) -> Result<()> {
    let token = ctx.tokens.get_valid_token().await?;
    let info = ctx.tokens.token_info().await;
    let shown = if args.reveal { token.clone() } else { mask(&token) };

    if ctx.json_output {
        return super::print_json(&serde_json::json!({
            "access_token": shown,
            "expires_at": info.as_ref().map(|i| i.expires_at.to_rfc3339()),
            "expires_in_secs": info.as_ref().map(|i| i.expires_in_secs),
        }));
    }

    println!("Access token: {}", shown);
    if let Some(info) = info {
        println!("Expires in:   {}", info.expires_in_display());
    }
    if ctx.verbose {
        let creds = ctx.tokens.credentials();
        println!("Token URL:    {}", creds.token_url());
        println!("Client ID:    {}", creds.client_id());
        println!("Scope:        {}", creds.scope().unwrap_or("-"));
    }

    Ok(())
}

fn mask(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{}…", prefix)
}
