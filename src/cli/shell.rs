use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use dialoguer::Confirm;

use alpha_config::{Config, ConfigManager};
use alpha_storage_json::JsonRosterStorage;

use crate::cli::output;
use crate::core::RosterManager;
use crate::errors::CliError;
use crate::utils::{self, build_info};

enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let base = utils::app_data_dir();
    let config_manager = ConfigManager::with_base_dir(base)?;
    let mut config = config_manager.load()?;
    output::set_color_enabled(config.ui_color_enabled);

    let storage = JsonRosterStorage::new(utils::data_dir(), utils::backups_root())?;
    let mut manager = RosterManager::open(Box::new(storage))?;
    if let Some(last) = config.last_opened_account.clone() {
        if manager.select(&last).is_err() {
            tracing::debug!("last opened account `{last}` is gone, keeping default selection");
        }
    }

    let today = Local::now().date_naive();
    manager.ensure_today(today, today)?;

    output::section(format!("Alpha Points {}", build_info::CLI_VERSION));
    output::render_status(&manager.current().name, &manager.status());
    output::info("type `help` for commands");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("alpha> ");
        io::stdout().flush().ok();
        input.clear();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .map_err(|err| CliError::Command(err.to_string()))?;
        if read == 0 {
            break;
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let tokens = match shell_words::split(trimmed) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::error(format!("could not parse input: {err}"));
                continue;
            }
        };
        if tokens.is_empty() {
            continue;
        }

        match dispatch(&mut manager, &config_manager, &mut config, &tokens) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => output::error(err),
        }
    }

    Ok(())
}

fn dispatch(
    manager: &mut RosterManager,
    config_manager: &ConfigManager,
    config: &mut Config,
    tokens: &[String],
) -> Result<LoopControl, CliError> {
    let command = tokens[0].as_str();
    let args = &tokens[1..];

    match command {
        "help" => print_help(),
        "quit" | "exit" => return Ok(LoopControl::Exit),
        "version" => print_version(),
        "accounts" | "ls" => {
            output::render_accounts(manager.roster(), manager.current_id());
        }
        "use" => {
            let key = join_args(args, "usage: use <account>")?;
            manager.select(&key)?;
            remember_selection(manager, config_manager, config);
            output::render_status(&manager.current().name, &manager.status());
        }
        "add" => {
            let name = join_args(args, "usage: add <name>")?;
            manager.create_account(&name)?;
            remember_selection(manager, config_manager, config);
            let today = Local::now().date_naive();
            manager.ensure_today(today, today)?;
            output::success(format!("created account `{}`", manager.current().name));
        }
        "remove" => {
            let key = join_args(args, "usage: remove <account>")?;
            manager.remove_account(&key)?;
            remember_selection(manager, config_manager, config);
            output::success(format!(
                "removed `{}`, now on `{}`",
                key,
                manager.current().name
            ));
        }
        "target" => {
            if args.is_empty() {
                match manager.current().target_points.value() {
                    Some(target) => output::info(format!("target: {target}")),
                    None => output::info("no target defined"),
                }
            } else if args[0] == "clear" {
                manager.set_target("")?;
                output::success("target cleared");
            } else {
                manager.set_target(&args[0])?;
                output::render_status(&manager.current().name, &manager.status());
            }
        }
        "today" => {
            let today = Local::now().date_naive();
            let start = match args.first() {
                Some(raw) => parse_start_date(raw)?,
                None => today,
            };
            manager.ensure_today(today, start)?;
            output::render_history(&manager.current().points_history);
            output::render_status(&manager.current().name, &manager.status());
        }
        "edit" => {
            if args.len() < 2 {
                return Err(CliError::Input("usage: edit <index> <points>".into()));
            }
            let index: usize = args[0]
                .parse()
                .map_err(|_| CliError::Input(format!("`{}` is not a row index", args[0])))?;
            let points: i64 = args[1]
                .parse()
                .map_err(|_| CliError::Input(format!("`{}` is not a point value", args[1])))?;
            manager.edit_day(index, points)?;
            output::render_history(&manager.current().points_history);
            output::render_status(&manager.current().name, &manager.status());
        }
        "history" => {
            output::render_history(&manager.current().points_history);
        }
        "status" => {
            output::render_status(&manager.current().name, &manager.status());
        }
        "summary" => {
            output::render_overview(&manager.overview());
        }
        "export" => {
            let path = PathBuf::from(join_args(args, "usage: export <path>")?);
            manager.export(&path)?;
            output::success(format!("exported snapshot to {}", path.display()));
        }
        "import" => {
            let path = PathBuf::from(join_args(args, "usage: import <path>")?);
            if confirm("Importing replaces every existing account. Continue?")? {
                let count = manager.import(&path)?;
                output::success(format!("imported {count} account(s)"));
                output::render_status(&manager.current().name, &manager.status());
            } else {
                output::info("import cancelled");
            }
        }
        "backup" => {
            let note = if args.is_empty() {
                None
            } else {
                Some(args.join(" "))
            };
            let info = manager.backup(note.as_deref())?;
            output::success(format!("wrote backup {}", info.id));
        }
        "backups" => {
            output::render_backups(&manager.list_backups()?);
        }
        "restore" => {
            let id = join_args(args, "usage: restore <backup-id>")?;
            let backups = manager.list_backups()?;
            let backup = backups
                .iter()
                .find(|entry| entry.id == id)
                .ok_or_else(|| CliError::Input(format!("no backup named `{id}`")))?;
            if confirm("Restoring replaces the current snapshot. Continue?")? {
                manager.restore(backup)?;
                output::success(format!("restored {}", backup.id));
                output::render_status(&manager.current().name, &manager.status());
            } else {
                output::info("restore cancelled");
            }
        }
        other => {
            return Err(CliError::Input(format!(
                "unknown command `{other}` (try `help`)"
            )));
        }
    }

    Ok(LoopControl::Continue)
}

fn remember_selection(
    manager: &RosterManager,
    config_manager: &ConfigManager,
    config: &mut Config,
) {
    config.last_opened_account = Some(manager.current_id().to_string());
    if let Err(err) = config_manager.save(config) {
        output::warning(format!("could not save preferences: {err}"));
    }
}

fn join_args(args: &[String], usage: &str) -> Result<String, CliError> {
    if args.is_empty() {
        return Err(CliError::Input(usage.into()));
    }
    Ok(args.join(" "))
}

fn parse_start_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("`{raw}` is not a date (expected YYYY-MM-DD)")))
}

fn confirm(prompt: &str) -> Result<bool, CliError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|err| CliError::Command(err.to_string()))
}

fn print_version() {
    let build = build_info::current();
    output::info(format!(
        "points_core {} ({} {}, {} build for {})",
        build.version, build.git_hash, build.git_status, build.profile, build.target
    ));
    output::info(format!("built at {}", build.timestamp));
}

fn print_help() {
    output::section("Commands");
    output::info("accounts            list accounts (current marked with *)");
    output::info("use <account>       switch the current account");
    output::info("add <name>          create an account and switch to it");
    output::info("remove <account>    delete an account (one must remain)");
    output::info("target [value]      show, set, or `clear` the target");
    output::info("today [since]       regenerate the 15-day window (since = YYYY-MM-DD)");
    output::info("edit <row> <pts>    change one day's points");
    output::info("history             show the daily points table");
    output::info("status              show totals and the projection");
    output::info("summary             overview across every account");
    output::info("export <path>       write the account array as JSON");
    output::info("import <path>       replace all accounts from a JSON export");
    output::info("backup [note]       snapshot the roster with a timestamp");
    output::info("backups             list available backups");
    output::info("restore <id>        roll back to a backup");
    output::info("version             show build information");
    output::info("quit                leave the shell");
}
