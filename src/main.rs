use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use subscription_tracker_lib::features::subscriptions::{
    self, ConfirmationOutcome, PendingConfirmation, RawSubscriptionInput, SubscriptionService,
    UpdateSubscriptionDto, CATEGORIES, PRESETS,
};
use subscription_tracker_lib::features::theme;
use subscription_tracker_lib::shared::database::{KeyValueSlot, SqliteSlot};
use subscription_tracker_lib::shared::utils::currency::{CurrencyFormatter, TryFormatter};
use subscription_tracker_lib::shared::EnvironmentConfig;

/// サブスクリプション管理ツール
#[derive(Debug, Parser)]
#[command(name = "subscription-tracker", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 一覧と合計を表示する
    List {
        /// カテゴリ（ALL は全件）
        #[arg(long, default_value = "ALL")]
        category: String,
        /// 並び順: PRICE_ASC, PRICE_DESC, NAME_ASC, NEWEST
        #[arg(long, default_value = "NEWEST")]
        sort: String,
    },
    /// サブスクリプションを追加する
    Add {
        /// プリセットのサービスキー（名前・カテゴリの初期値に使用）
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: String,
        #[arg(long, value_parser = PossibleValuesParser::new(CATEGORIES))]
        category: Option<String>,
    },
    /// サブスクリプションを編集する
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(CATEGORIES))]
        category: Option<String>,
        #[arg(long)]
        service: Option<String>,
    },
    /// サブスクリプションを削除する
    Delete {
        id: String,
        /// 確認せずに削除する
        #[arg(long)]
        yes: bool,
    },
    /// すべてのサブスクリプションを削除する
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// CSVにエクスポートする
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// テーマを表示・切り替える
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: ThemeAction,
    },
    /// サービスプリセットを表示する
    Presets,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let env_config = subscription_tracker_lib::initialize_application();

    match run(cli.command, &env_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, env_config: &EnvironmentConfig) -> Result<(), String> {
    let formatter = TryFormatter;

    match command {
        Command::List { category, sort } => {
            let mut service = open_service(env_config)?;
            let view = subscriptions::get_subscriptions(&mut service, &category, &sort);

            if service.subscriptions().is_empty() {
                println!("Henüz abonelik yok.");
            }
            for sub in &view.items {
                println!(
                    "{} {:<24} {:<10} {:>12}  {}",
                    sub.icon(),
                    sub.name,
                    sub.category,
                    formatter.format(sub.price),
                    sub.id
                );
            }
            println!("Aylık toplam: {}", formatter.format(view.totals.monthly_total));
            println!("Yıllık toplam: {}", formatter.format(view.totals.yearly_total));
        }
        Command::Add {
            service: service_key,
            name,
            price,
            category,
        } => {
            // プリセットを初期値として使い、指定された項目で上書きする
            let mut input = match service_key.as_deref() {
                Some(key) => subscriptions::prefill(key),
                None => RawSubscriptionInput::default(),
            };
            UpdateSubscriptionDto {
                name,
                price: Some(price.as_str().into()),
                category,
                service_key,
            }
            .apply_to(&mut input);

            let mut service = open_service(env_config)?;
            let created = subscriptions::create_subscription(&mut service, input)?;
            println!("Eklendi: {} {} ({})", created.icon(), created.name, created.id);
        }
        Command::Edit {
            id,
            name,
            price,
            category,
            service: service_key,
        } => {
            let dto = UpdateSubscriptionDto {
                name,
                price: price.map(|p| p.as_str().into()),
                category,
                service_key,
            };

            let mut service = open_service(env_config)?;
            match subscriptions::update_subscription(&mut service, &id, dto)? {
                Some(updated) => println!("Güncellendi: {} ({})", updated.name, updated.id),
                None => println!("Kayıt bulunamadı, değişiklik yapılmadı: {id}"),
            }
        }
        Command::Delete { id, yes } => {
            let mut service = open_service(env_config)?;
            match subscriptions::request_subscription_deletion(&mut service, &id) {
                Some(pending) => resolve(&mut service, pending, yes)?,
                None => println!("Kayıt bulunamadı: {id}"),
            }
        }
        Command::Clear { yes } => {
            let mut service = open_service(env_config)?;
            match subscriptions::request_clear_all_subscriptions(&mut service) {
                Some(pending) => resolve(&mut service, pending, yes)?,
                None => println!("Silinecek abonelik yok."),
            }
        }
        Command::Export { output } => {
            let service = open_service(env_config)?;
            let path = subscriptions::export_subscriptions(&service, output.as_deref())?;
            println!("Dışa aktarıldı: {}", path.display());
        }
        Command::Theme { action } => {
            let mut slot = subscription_tracker_lib::open_slot(env_config)
                .map_err(|e| e.report("データベースを開く"))?;
            let current = match action {
                ThemeAction::Show => theme::load_theme(&slot, &env_config.theme_key),
                ThemeAction::Toggle => theme::toggle_theme(&mut slot, &env_config.theme_key)
                    .map_err(|e| e.report("テーマの切り替え"))?,
            };
            println!("Tema: {}", current.as_str());
        }
        Command::Presets => {
            for preset in PRESETS.iter() {
                println!(
                    "{:<12} {} {:<16} {}",
                    preset.key, preset.icon, preset.label, preset.category
                );
            }
        }
    }

    Ok(())
}

fn open_service(env_config: &EnvironmentConfig) -> Result<SubscriptionService<SqliteSlot>, String> {
    subscription_tracker_lib::open_service(env_config).map_err(|e| e.report("データベースを開く"))
}

/// 確認待ちリクエストをユーザーに確認して確定する
fn resolve<S: KeyValueSlot>(
    service: &mut SubscriptionService<S>,
    pending: PendingConfirmation,
    assume_yes: bool,
) -> Result<(), String> {
    let accepted = assume_yes || ask(&pending.prompt).map_err(|e| e.to_string())?;

    match subscriptions::resolve_confirmation(service, &pending.token, accepted)? {
        ConfirmationOutcome::Performed(_) => println!("Silindi."),
        ConfirmationOutcome::AlreadyGone(_) => println!("Kayıt zaten silinmiş."),
        ConfirmationOutcome::Cancelled => println!("İptal edildi."),
    }
    Ok(())
}

/// e/H（evet/hayır）で確認する
fn ask(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [e/H] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "e" | "evet" | "y" | "yes"
    ))
}
