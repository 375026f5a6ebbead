use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use jarvis_shared::{Category, DraftField, Filter, Priority};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "jarvis",
    version,
    about = "Jarvis: plan smarter, achieve more. A local task tracker."
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "jarvisrc", global = true)]
    pub jarvisrc: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List tasks with per-filter counts
    List {
        #[arg(short = 'f', long = "filter", default_value = "all")]
        filter: Filter,
    },
    /// Show every field of one task
    Show { id: u64 },
    /// Create a task
    Add(AddArgs),
    /// Change fields of an existing task
    Edit(EditArgs),
    /// Delete a task
    Delete { id: u64 },
    /// Flip a task between pending and completed
    Toggle { id: u64 },
}

impl Default for Command {
    fn default() -> Self {
        Command::List {
            filter: Filter::All,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: String,

    #[arg(long = "start")]
    pub start_date: NaiveDate,

    #[arg(long = "end")]
    pub end_date: NaiveDate,

    #[arg(long)]
    pub priority: Priority,

    #[arg(long)]
    pub category: Category,
}

impl AddArgs {
    pub fn changes(&self) -> Vec<DraftField> {
        vec![
            DraftField::Name(self.name.clone()),
            DraftField::Description(self.description.clone()),
            DraftField::StartDate(Some(self.start_date)),
            DraftField::EndDate(Some(self.end_date)),
            DraftField::Priority(Some(self.priority)),
            DraftField::Category(Some(self.category)),
        ]
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: u64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "start")]
    pub start_date: Option<NaiveDate>,

    #[arg(long = "end")]
    pub end_date: Option<NaiveDate>,

    #[arg(long)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub category: Option<Category>,
}

impl EditArgs {
    /// Only the flags that were given; everything else keeps its value.
    pub fn changes(&self) -> Vec<DraftField> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            out.push(DraftField::Name(name.clone()));
        }
        if let Some(description) = &self.description {
            out.push(DraftField::Description(description.clone()));
        }
        if let Some(date) = self.start_date {
            out.push(DraftField::StartDate(Some(date)));
        }
        if let Some(date) = self.end_date {
            out.push(DraftField::EndDate(Some(date)));
        }
        if let Some(priority) = self.priority {
            out.push(DraftField::Priority(Some(priority)));
        }
        if let Some(category) = self.category {
            out.push(DraftField::Category(Some(category)));
        }
        out
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 || verbose == 0 {
        "warn"
    } else if verbose == 1 {
        "info"
    } else if verbose == 2 {
        "debug"
    } else {
        "trace"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_list_all() {
        let cli = GlobalCli::parse_from(["jarvis"]);
        assert_eq!(cli.command.unwrap_or_default(), Command::default());
    }

    #[test]
    fn parses_add_with_typed_values() {
        let cli = GlobalCli::parse_from([
            "jarvis",
            "add",
            "--name",
            "Buy milk",
            "--description",
            "2 litres",
            "--start",
            "2024-06-10",
            "--end",
            "2024-06-11",
            "--priority",
            "low",
            "--category",
            "Personal",
        ]);
        let Some(Command::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.priority, Priority::Low);
        assert_eq!(args.category, Category::Personal);
        assert_eq!(args.changes().len(), 6);
    }

    #[test]
    fn edit_collects_only_given_flags() {
        let cli = GlobalCli::parse_from(["jarvis", "edit", "17", "--name", "Buy oat milk"]);
        let Some(Command::Edit(args)) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.id, 17);
        assert_eq!(
            args.changes(),
            vec![DraftField::Name("Buy oat milk".to_string())]
        );
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = GlobalCli::parse_from([
            "jarvis",
            "list",
            "--filter",
            "completed",
            "-vv",
            "--rc",
            "color=off",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.rc_overrides,
            vec![KeyVal {
                key: "color".to_string(),
                value: "off".to_string()
            }]
        );
        assert_eq!(
            cli.command,
            Some(Command::List {
                filter: Filter::Completed
            })
        );
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let result = GlobalCli::try_parse_from(["jarvis", "list", "--filter", "done"]);
        assert!(result.is_err());
    }
}
