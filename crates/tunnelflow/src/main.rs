mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use tunnelflow_cloud::{DEFAULT_SERVICE_URL, TunnelPolicy};
use tunnelflow_cloud_cloudflare::{ClientConfig, CloudflareProvider};

#[derive(Parser)]
#[command(name = "tunnelflow")]
#[command(about = "ホスト名ひとつで、トンネルとDNSがそろう。", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// デバッグログを出力（RUST_LOG より優先）
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Cloudflare API のベースURL
    #[arg(long, env = "CLOUDFLARE_API_BASE", global = true, hide = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    // サブコマンドを省略した場合は up として扱う
    #[command(flatten)]
    up: UpArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// トンネル・ingress・DNSレコードをプロビジョニング
    #[command(alias = "provision")]
    Up(UpArgs),
    /// ホスト名のDNSレコードとトンネルを削除
    Down {
        /// Cloudflare APIトークン
        credential: String,
        /// 公開ホスト名（例: svc.example.com）
        hostname: String,
    },
    /// APIトークンが有効か確認
    Verify {
        /// Cloudflare APIトークン
        credential: String,
    },
    /// バージョン情報を表示
    Version,
}

#[derive(Args)]
struct UpArgs {
    #[command(flatten)]
    target: Option<Target>,
    /// 同名トンネルの扱い (reuse, recreate)
    #[arg(long, env = "TUNNELFLOW_POLICY", default_value_t = TunnelPolicy::Reuse)]
    policy: TunnelPolicy,
    /// 途中で失敗したら、この実行で作成・変更したリソースを元に戻す
    #[arg(long, conflicts_with = "dry_run")]
    rollback: bool,
    /// 変更内容を表示するだけで実行しない
    #[arg(long)]
    dry_run: bool,
    /// 結果をJSONオブジェクト1つで出力
    #[arg(long)]
    json: bool,
}

// 位置引数だけのグループ。環境変数つきの引数を含めると、
// サブコマンド指定時にもグループが存在扱いになる
#[derive(Args)]
struct Target {
    /// Cloudflare APIトークン
    credential: String,
    /// 公開ホスト名（例: svc.example.com）
    hostname: String,
    /// 転送先のサービスURL
    #[arg(default_value = DEFAULT_SERVICE_URL)]
    service: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // ログはstderrへ（stdoutはレポート専用）
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let api_base = cli.api_base.as_deref();

    let command = cli.command.unwrap_or(Commands::Up(cli.up));

    match command {
        Commands::Up(args) => {
            let Some(target) = args.target else {
                anyhow::bail!("APIトークンとホスト名を指定してください");
            };
            // 入力の検証はネットワークに触れる前に行う
            let desired = tunnelflow_cloud::DesiredState::new(&target.hostname, &target.service)?;
            let provider = connect(&target.credential, api_base)?;
            let options = tunnelflow_cloud::ProvisionOptions {
                policy: args.policy,
                rollback: args.rollback,
            };

            if args.dry_run {
                commands::provision::plan(&provider, &desired, args.policy, args.json).await?;
            } else {
                commands::provision::handle(&provider, &desired, options, args.json).await?;
            }
        }
        Commands::Down {
            credential,
            hostname,
        } => {
            tunnelflow_cloud::resolve(&hostname)?;
            let provider = connect(&credential, api_base)?;
            commands::teardown::handle(&provider, &hostname).await?;
        }
        Commands::Verify { credential } => {
            let provider = connect(&credential, api_base)?;
            commands::verify::handle(&provider).await?;
        }
        Commands::Version => {
            println!("tunnelflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn connect(credential: &str, api_base: Option<&str>) -> anyhow::Result<CloudflareProvider> {
    let mut config = ClientConfig::new(credential)?;
    if let Some(base_url) = api_base {
        config = config.with_base_url(base_url)?;
    }
    tracing::debug!("Using Cloudflare API at {}", config.base_url);

    Ok(CloudflareProvider::new(config)?)
}
