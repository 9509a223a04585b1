use colored::Colorize;
use tunnelflow_cloud::TunnelApi;

pub async fn handle(api: &dyn TunnelApi) -> anyhow::Result<()> {
    let status = api.verify_token().await?;

    if !status.authenticated {
        anyhow::bail!(
            "APIトークンが無効です: {}",
            status.error.as_deref().unwrap_or("unknown error")
        );
    }

    println!("{}", "✓ APIトークンは有効です".green().bold());
    if let Some(info) = status.account_info {
        println!("  Token ID: {}", info.cyan());
    }

    Ok(())
}
