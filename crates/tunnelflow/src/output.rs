use colored::Colorize;
use tunnelflow_cloud::{Action, ActionResult, ActionType, ApplyResult, Plan, ProvisionReport};

const UNAVAILABLE: &str = "(unavailable)";

/// 人間向けレポート + 認証情報のJSON行（最終行）
pub fn print_report(report: &ProvisionReport) -> anyhow::Result<()> {
    println!();
    println!("{}", "✓ プロビジョニング完了".green().bold());
    println!();
    field("Zone ID", &report.zone_id);
    field("Account ID", &report.account_id);
    field(
        "Tunnel",
        &format!(
            "{} ({}) [{}]",
            report.tunnel_name, report.tunnel_id, report.tunnel_action
        ),
    );
    field("Hostname", &report.hostname);
    field(
        "CNAME",
        &format!("{} [{}]", report.cname_target, report.dns_action),
    );
    field("Service", &report.service_url);
    field("Token", report.token.as_deref().unwrap_or(UNAVAILABLE));
    field("Secret", report.secret.as_deref().unwrap_or(UNAVAILABLE));

    if report.secret.is_none() {
        println!();
        println!(
            "{}",
            "⚠ トンネルシークレットを取得できませんでした。TunnelSecret は空になります。".yellow()
        );
    }

    println!();
    println!("{}", "コネクタ認証情報:".bold());
    println!("{}", report.credentials_json()?);
    Ok(())
}

fn field(label: &str, value: &str) {
    println!("  {:<12} {}", format!("{}:", label).dimmed(), value);
}

pub fn print_plan(plan: &Plan) {
    println!();
    println!("{}", "実行計画:".bold());
    for action in &plan.actions {
        print_action(action);
    }
    println!();
    println!("  {}", plan.summary().to_string().cyan());

    if !plan.has_changes {
        println!("{}", "✓ 変更はありません".green());
    }
}

fn print_action(action: &Action) {
    let marker = match action.action_type {
        ActionType::Create => "+".green(),
        ActionType::Update => "~".yellow(),
        ActionType::Delete => "-".red(),
        ActionType::NoOp => "=".dimmed(),
    };
    println!(
        "  {} {:<22} {}",
        marker,
        action.resource_type.cyan(),
        action.description
    );
    // 並びを安定させる
    let mut details: Vec<_> = action.details.iter().collect();
    details.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in details {
        println!("      {} {}", format!("{}:", key).dimmed(), value);
    }
}

/// 削除の各アクション結果
pub fn print_apply_result(result: &ApplyResult) {
    for done in &result.succeeded {
        println!("  {} {}", "✓".green(), done.message);
    }
    for failed in &result.failed {
        println!("  {} {}", "✗".red(), failure_message(failed));
    }
}

/// ロールバック結果はstderrへ（stdoutにはJSONが出ることがある）
pub fn eprint_rollback(result: &ApplyResult) {
    eprintln!();
    eprintln!("{}", "↩ ロールバック:".yellow().bold());
    for done in &result.succeeded {
        eprintln!("  {} {}", "✓".green(), done.message);
    }
    for failed in &result.failed {
        eprintln!("  {} {}", "✗".red(), failure_message(failed));
    }
    if !result.is_success() {
        eprintln!(
            "{}",
            "⚠ 元に戻せなかったリソースがあります。手動で確認してください。".yellow()
        );
    }
}

fn failure_message(failed: &ActionResult) -> String {
    format!(
        "{}: {}",
        failed.action_id,
        failed.error.as_deref().unwrap_or("unknown error")
    )
}
