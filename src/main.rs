use clap::Parser;
use colored::Colorize;
use pet_friends_check::core::report::{NoticeKind, Outcome, SuiteReport};
use pet_friends_check::utils::error::{ErrorSeverity, PetFriendsError};
use pet_friends_check::utils::{logger, validation::Validate};
use pet_friends_check::{default_suite, CliConfig, PetFriends};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    let mut suite = default_suite();

    if config.list {
        for name in suite.scenario_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    tracing::info!("Starting pet-friends-check");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證設定
    let settings = match config
        .load_settings()
        .and_then(|settings| settings.validate().map(|_| settings))
    {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    // 篩選要執行的情境
    if let Err(e) = suite.retain_only(&config.only) {
        exit_with(e);
    }

    let client = match PetFriends::from_config(&settings) {
        Ok(client) => client,
        Err(e) => exit_with(e),
    };

    // 依序執行並輸出結果
    let report = suite.run(&client, &settings).await;
    print_report(&report);

    if let Some(path) = &config.report {
        if let Err(e) = report.write_json(path).await {
            exit_with(e);
        }
        println!("📁 Report saved to: {}", path.display());
    }

    // 有情境失敗時以非零退出碼結束
    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(report: &SuiteReport) {
    for result in &report.results {
        match &result.outcome {
            Outcome::Passed => println!("✅ {} ({} ms)", result.name, result.duration_ms),
            Outcome::PassedWithBugs => {
                println!("⚠️  {} ({} ms)", result.name, result.duration_ms)
            }
            Outcome::Failed { message } => println!("❌ {}: {}", result.name, message),
        }

        for notice in &result.notices {
            let marker = match notice.kind {
                NoticeKind::Bug => notice.kind.label().red().bold(),
                NoticeKind::Warning => notice.kind.label().red(),
            };
            println!("    {} {}", marker, notice.message);
        }
    }

    let summary = report.summary();
    println!(
        "\n📊 {} scenarios: {} passed, {} passed with bugs, {} failed ({} ms)",
        summary.total,
        summary.passed,
        summary.passed_with_bugs,
        summary.failed,
        summary.total_duration_ms
    );
}

fn exit_with(e: PetFriendsError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
    eprintln!("{} {}", "Error:".red().bold(), e.user_friendly_message());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 1,
        ErrorSeverity::High => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
