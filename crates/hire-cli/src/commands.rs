//! Non-interactive subcommands.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Subcommand;
use hire_core::{
  clock::Clock,
  equipment::NewEquipment,
  storage::SlotStorage,
  tracker::Tracker,
};

use crate::report;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
  /// Start hiring a new item.
  Add {
    #[arg(long)]
    name:  String,
    #[arg(long)]
    site:  String,
    /// Daily rate.
    #[arg(long)]
    rate:  String,
    /// Hire start date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    start: Option<String>,
  },
  /// Move an item to the archive.
  Archive { id: String },
  /// Return an archived item to active.
  Restore { id: String },
  /// Permanently remove an item.
  Delete { id: String },
  /// Print both views with their totals.
  List,
}

pub fn run<S, C>(
  command: Command,
  tracker: &mut Tracker<S, C>,
  currency: &str,
  out: &mut impl Write,
) -> Result<()>
where
  S: SlotStorage,
  C: Clock,
{
  match command {
    Command::Add { name, site, rate, start } => {
      let start = start.unwrap_or_else(|| tracker.today().to_string());
      let draft = NewEquipment::parse(&name, &site, &rate, &start)
        .context("invalid equipment")?;
      let item = tracker.add(draft).context("saving new equipment")?;
      writeln!(out, "added {}  {}", item.id(), report::describe(item, currency))?;
    }
    Command::Archive { id } => {
      let changed = tracker.archive(&id).context("archiving equipment")?;
      report_change(out, changed, "archived", &id)?;
    }
    Command::Restore { id } => {
      let changed = tracker.restore(&id).context("restoring equipment")?;
      report_change(out, changed, "restored", &id)?;
    }
    Command::Delete { id } => {
      let changed = tracker.delete(&id).context("deleting equipment")?;
      report_change(out, changed, "deleted", &id)?;
    }
    Command::List => {
      let text = report::render(tracker.items(), tracker.today(), currency);
      out.write_all(text.as_bytes())?;
    }
  }
  Ok(())
}

fn report_change(
  out: &mut impl Write,
  changed: bool,
  verb: &str,
  id: &str,
) -> Result<()> {
  if changed {
    writeln!(out, "{verb} {id}")?;
  } else {
    writeln!(out, "nothing to do for {id}")?;
  }
  Ok(())
}
