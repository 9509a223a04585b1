use crate::output;
use colored::Colorize;
use tunnelflow_cloud::TunnelApi;

pub async fn handle(api: &dyn TunnelApi, hostname: &str) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("🧹 {} のトンネルとDNSレコードを削除中...", hostname).yellow()
    );

    let result = tunnelflow_cloud::teardown(api, hostname).await?;

    println!();
    if result.is_empty() {
        println!("  ℹ 削除するリソースはありません");
        return Ok(());
    }

    output::print_apply_result(&result);
    println!();
    println!(
        "{}",
        format!("✓ {} 件のリソースを削除しました", result.succeeded.len())
            .green()
            .bold()
    );

    Ok(())
}
