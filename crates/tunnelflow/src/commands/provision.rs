use crate::output;
use colored::Colorize;
use tunnelflow_cloud::{DesiredState, ProvisionOptions, Provisioner, TunnelApi, TunnelPolicy};

pub async fn handle(
    api: &dyn TunnelApi,
    desired: &DesiredState,
    options: ProvisionOptions,
    json: bool,
) -> anyhow::Result<()> {
    if !json {
        println!(
            "{}",
            format!("🚇 {} をプロビジョニング中...", desired.hostname)
                .blue()
                .bold()
        );
        println!("  トンネル名: {}", desired.tunnel_name.cyan());
        println!("  ゾーン:     {}", desired.root_domain.cyan());
        println!("  サービス:   {}", desired.service_url.cyan());
        println!("  ポリシー:   {}", options.policy.to_string().cyan());
    }

    let mut provisioner = Provisioner::new(api, options);
    let report = match provisioner.run(desired).await {
        Ok(report) => report,
        Err(e) => {
            if let Some(result) = provisioner.rollback_result() {
                output::eprint_rollback(result);
            } else if !options.rollback {
                eprintln!(
                    "{}",
                    "ヒント: 途中まで作成されたリソースは再実行で収束します".dimmed()
                );
            }
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string(&report.to_json()?)?);
    } else {
        output::print_report(&report)?;
    }

    Ok(())
}

/// --dry-run: 読み取りのみで実行計画を表示
pub async fn plan(
    api: &dyn TunnelApi,
    desired: &DesiredState,
    policy: TunnelPolicy,
    json: bool,
) -> anyhow::Result<()> {
    let plan = tunnelflow_cloud::plan(api, desired, policy).await?;

    if json {
        println!("{}", serde_json::to_string(&plan)?);
    } else {
        println!(
            "{}",
            format!("🔍 {} の実行計画を作成しました（変更は行いません）", desired.hostname)
                .blue()
                .bold()
        );
        output::print_plan(&plan);
    }

    Ok(())
}
