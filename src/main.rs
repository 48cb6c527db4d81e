use clap::Parser;
use project_submission::core::connect::{connect, contract_source};
use project_submission::utils::error::{ClientError, ErrorSeverity};
use project_submission::utils::logger;
use project_submission::{App, CliConfig, Command};
use serde::Serialize;

fn exit_code(e: &ClientError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: ClientError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn render<T: Serialize>(value: Option<T>) -> anyhow::Result<Option<String>> {
    value
        .map(|v| serde_json::to_string_pretty(&v))
        .transpose()
        .map_err(Into::into)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli.resolve().unwrap_or_else(|e| fail(e));
    let web3 = connect(&config).unwrap_or_else(|e| fail(e));
    let source = contract_source(&config).unwrap_or_else(|e| fail(e));

    let mut app = App::new(source);
    if app.init(web3).await.is_none() {
        eprintln!("❌ Could not connect to the ProjectSubmission contract");
        std::process::exit(1);
    }

    let output = match cli.command {
        Command::Owner => render(app.read_owner_address().await)?,
        Command::OwnerBalance => app.read_owner_balance().await.map(|b| b.to_string()),
        Command::Account => render(app.get_account().await)?,
        Command::University { account } => render(app.read_university_state(account).await)?,
        Command::RegisterUniversity { account } => {
            render(app.register_university(account).await)?
        }
        Command::DisableUniversity { account } => render(app.disable_university(account).await)?,
        Command::SubmitProject {
            project_hash,
            university,
            amount,
        } => render(app.submit_project(project_hash, university, amount).await)?,
        Command::ReviewProject {
            project_hash,
            status,
        } => render(app.review_project(project_hash, status).await)?,
        Command::Project { project_hash } => render(app.read_project_state(project_hash).await)?,
        Command::Donate {
            project_hash,
            amount,
        } => render(app.donate(project_hash, amount).await)?,
        Command::Withdraw => render(app.withdraw().await)?,
        Command::AuthorWithdraw { project_hash } => {
            render(app.author_withdraw(project_hash).await)?
        }
    };

    match output {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => {
            // 錯誤細節已由 App 記錄
            eprintln!("❌ Contract call failed, see the log above");
            std::process::exit(1);
        }
    }
}
