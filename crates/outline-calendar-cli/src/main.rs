use anyhow::{Context, Result, anyhow, bail};
use outline_calendar_config::Config;
use outline_calendar_engine::calendars::Calendar;
use outline_calendar_engine::models::{Completion, LocatedEvent, parse_date};
use outline_calendar_engine::{EventPatch, io};
use std::{env, path::PathBuf, process};

const USAGE: &str = "\
Usage: outline-calendar [--notes <notes-folder-path>] <command>

Commands:
  list                        Print every calendar's events, numbered
  agenda <YYYY-MM-DD>         Print the events falling on a day
  check <calendar-id> <n>     Mark event n of a calendar as done
  uncheck <calendar-id> <n>   Mark event n of a calendar as not done";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Agenda(String),
    SetCompletion {
        calendar_id: String,
        number: usize,
        done: bool,
    },
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    notes_path: Option<PathBuf>,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut notes_path = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--notes" {
            let path = iter.next().ok_or_else(|| anyhow!("--notes needs a path"))?;
            notes_path = Some(PathBuf::from(path));
        } else {
            rest.push(arg.as_str());
        }
    }

    let command = match rest.as_slice() {
        ["list"] => Command::List,
        ["agenda", day] => Command::Agenda(day.to_string()),
        [verb @ ("check" | "uncheck"), calendar_id, number] => Command::SetCompletion {
            calendar_id: calendar_id.to_string(),
            number: number
                .parse()
                .with_context(|| format!("event number must be a positive integer, got {number:?}"))?,
            done: *verb == "check",
        },
        _ => bail!("unrecognised arguments"),
    };

    Ok(Args {
        notes_path,
        command,
    })
}

fn print_events(calendar: &dyn Calendar, events: &[LocatedEvent]) {
    match calendar.color() {
        Some(color) => println!("{} ({color})", calendar.id()),
        None => println!("{}", calendar.id()),
    }
    for (i, located) in events.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, located.event);
    }
}

fn list(calendars: &[Box<dyn Calendar>]) -> Result<()> {
    for calendar in calendars {
        let events = calendar
            .events()
            .with_context(|| format!("reading calendar {}", calendar.id()))?;
        print_events(calendar.as_ref(), &events);
    }
    Ok(())
}

fn agenda(calendars: &[Box<dyn Calendar>], day: &str) -> Result<()> {
    let day = parse_date(day).ok_or_else(|| anyhow!("expected a date like 2024-03-05, got {day:?}"))?;

    let mut entries = Vec::new();
    for calendar in calendars {
        let events = calendar
            .events()
            .with_context(|| format!("reading calendar {}", calendar.id()))?;
        entries.extend(
            events
                .into_iter()
                .filter(|located| located.event.occurs_on(day))
                .map(|located| (calendar.id(), located.event)),
        );
    }
    // All-day events first, then by start time
    entries.sort_by_key(|(_, event)| (!event.all_day, event.start_time()));

    println!("{}", day.format("%A %Y-%m-%d"));
    for (calendar_id, event) in entries {
        println!("  {event}  ({calendar_id})");
    }
    Ok(())
}

fn set_completion(
    calendars: &[Box<dyn Calendar>],
    calendar_id: &str,
    number: usize,
    done: bool,
) -> Result<()> {
    let calendar = calendars
        .iter()
        .find(|calendar| calendar.id() == calendar_id)
        .ok_or_else(|| anyhow!("no calendar with id {calendar_id:?}"))?;

    let events = calendar.events()?;
    let located = number
        .checked_sub(1)
        .and_then(|i| events.get(i))
        .ok_or_else(|| anyhow!("{calendar_id} has {} events, no event {number}", events.len()))?;

    let completion = if done {
        Completion::Done("x".to_string())
    } else {
        Completion::Todo
    };
    let patch = EventPatch::from(&located.event).with_completion(completion);

    if !calendar.modify_event(located.span, &patch, &[])? {
        bail!("the note changed while editing; run `list` and try again");
    }
    log::info!("Event {number} of {calendar_id} updated");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config_path = Config::config_path();
    log::debug!("Config path: {}", config_path.display());

    let loaded = Config::load()?;
    let from_config = args.notes_path.is_none();
    let config = match (args.notes_path, loaded) {
        (Some(notes_path), Some(config)) => Config {
            notes_path,
            ..config
        },
        (Some(notes_path), None) => Config::new(notes_path),
        (None, Some(config)) => config,
        (None, None) => {
            eprintln!("Error: No notes path provided and no config file found");
            eprintln!("Create a config file at {}", config_path.display());
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if let Err(e) = io::validate_notes_dir(&config.notes_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Notes path '{}'{} is invalid: {e}",
            config.notes_path.display(),
            source
        );
        process::exit(1);
    }

    let calendars = config.open_calendars()?;
    if calendars.is_empty() {
        log::warn!("No calendars configured in {}", config_path.display());
    }

    match args.command {
        Command::List => list(&calendars),
        Command::Agenda(day) => agenda(&calendars, &day),
        Command::SetCompletion {
            calendar_id,
            number,
            done,
        } => set_completion(&calendars, &calendar_id, number, done),
    }
}
