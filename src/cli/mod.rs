//! Argument-driven command line front end.

pub mod output;

use std::{env, path::PathBuf};

use split_config::{Config, ConfigManager};
use split_core::{
    integrity::integrity_report, BalanceService, GroupService, PolicyFormatter, SettlementService,
};
use split_domain::SettlementModel;
use split_storage_json::load_group_from_path;

use crate::{errors::CliError, utils::build_info};

/// Environment variable that overrides the SplitLedger data directory.
pub const HOME_ENV: &str = "SPLITLEDGER_HOME";

/// How a successfully executed command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// `check` found this many violations.
    Violations(usize),
}

impl CommandOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            CommandOutcome::Success => 0,
            CommandOutcome::Violations(_) => 1,
        }
    }
}

/// Runs the CLI against the process arguments.
pub fn run_cli() -> Result<CommandOutcome, CliError> {
    run(env::args().skip(1).collect())
}

pub fn run(args: Vec<String>) -> Result<CommandOutcome, CliError> {
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Err(CliError::Input(usage()));
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "balance" => {
            let opts = GroupArgs::parse(&rest, true)?;
            let (config, _) = load_config()?;
            balance(&opts, &config)
        }
        "settle" => {
            let opts = GroupArgs::parse(&rest, false)?;
            let (config, _) = load_config()?;
            settle(&opts, &config)
        }
        "check" => {
            let opts = GroupArgs::parse(&rest, false)?;
            let (config, _) = load_config()?;
            check(&opts, &config)
        }
        "new" => {
            let name = rest.join(" ");
            if name.trim().is_empty() {
                return Err(CliError::Input("`new` requires a group name".into()));
            }
            let group = GroupService::create(name.trim());
            println!("{}", serde_json::to_string_pretty(&group)?);
            Ok(CommandOutcome::Success)
        }
        "config" => {
            let (config, manager) = load_config()?;
            println!("Config file: {}", manager.config_path().display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(CommandOutcome::Success)
        }
        "version" => {
            println!("{}", build_info::current());
            Ok(CommandOutcome::Success)
        }
        "help" | "--help" | "-h" => {
            println!("{}", usage());
            Ok(CommandOutcome::Success)
        }
        other => Err(CliError::Input(format!(
            "unknown command `{other}`\n{}",
            usage()
        ))),
    }
}

fn balance(opts: &GroupArgs, config: &Config) -> Result<CommandOutcome, CliError> {
    let group = load_group_from_path(&opts.path)?;
    let model = opts.model.unwrap_or(config.settlement_model);
    let view = BalanceService::compute_with(&group, model)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        output::configure_color(config.ui_color_enabled);
        let formatter = PolicyFormatter::new(config.rounding_policy());
        print!("{}", output::render_balance(&view, &formatter, &config.currency));
    }
    Ok(CommandOutcome::Success)
}

fn settle(opts: &GroupArgs, config: &Config) -> Result<CommandOutcome, CliError> {
    let group = load_group_from_path(&opts.path)?;
    let model = opts.model.unwrap_or(config.settlement_model);
    let view = BalanceService::compute_with(&group, model)?;
    let policy = config.rounding_policy();
    let transfers = SettlementService::suggest(&view, policy);

    output::configure_color(config.ui_color_enabled);
    let formatter = PolicyFormatter::new(policy);
    print!(
        "{}",
        output::render_transfers(&view, &transfers, &formatter, &config.currency)
    );
    Ok(CommandOutcome::Success)
}

fn check(opts: &GroupArgs, config: &Config) -> Result<CommandOutcome, CliError> {
    let group = load_group_from_path(&opts.path)?;
    let model = opts.model.unwrap_or(config.settlement_model);
    let violations = integrity_report(&group, model);

    output::configure_color(config.ui_color_enabled);
    print!("{}", output::render_violations(&group.name, &violations));
    if violations.is_empty() {
        Ok(CommandOutcome::Success)
    } else {
        Ok(CommandOutcome::Violations(violations.len()))
    }
}

/// Resolves the data directory and loads the effective configuration.
fn load_config() -> Result<(Config, ConfigManager), CliError> {
    let base = match env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::data_dir()
            .map(|dir| dir.join("splitledger"))
            .ok_or_else(|| {
                CliError::Command(format!(
                    "could not determine a data directory; set {HOME_ENV}"
                ))
            })?,
    };
    let manager = ConfigManager::with_base_dir(base)?;
    let config = manager.load()?;
    Ok((config, manager))
}

#[derive(Debug, Clone, PartialEq)]
struct GroupArgs {
    path: PathBuf,
    model: Option<SettlementModel>,
    json: bool,
}

impl GroupArgs {
    fn parse(args: &[String], allow_json: bool) -> Result<Self, CliError> {
        let mut path = None;
        let mut model = None;
        let mut json = false;
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--model" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| CliError::Input("`--model` requires a value".into()))?;
                    model = Some(SettlementModel::parse(value).ok_or_else(|| {
                        CliError::Input(format!(
                            "unknown settlement model `{value}` (expected transfer or pool)"
                        ))
                    })?);
                }
                "--json" if allow_json => json = true,
                flag if flag.starts_with("--") => {
                    return Err(CliError::Input(format!("unknown option `{flag}`")));
                }
                value if path.is_none() => path = Some(PathBuf::from(value)),
                extra => {
                    return Err(CliError::Input(format!("unexpected argument `{extra}`")));
                }
            }
        }

        let path = path.ok_or_else(|| CliError::Input("missing group file argument".into()))?;
        Ok(Self { path, model, json })
    }
}

fn usage() -> String {
    "Usage: splitledger_cli <command>\n\
     Commands:\n  \
     balance <group.json> [--model transfer|pool] [--json]\n  \
     settle <group.json> [--model transfer|pool]\n  \
     check <group.json> [--model transfer|pool]\n  \
     new <name>\n  \
     config\n  \
     version"
        .to_string()
}
