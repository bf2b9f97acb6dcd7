use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use pratac::config::{Configuration, DATE_FORMAT, parse_date};
use pratac::wizard::{confirm, prompt_configuration};
use pratac::{
    Clock, ConfigStore, FixedClock, JsonConfigStore, PersonOffset, PersonSlot, PratacError,
    RoomOffset, SystemClock, WeekSchedule, assign, current_week_offset, default_config_path,
    rotation_plan, save_plan_to_csv, save_plan_to_json, week_range, week_schedule,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Weekly cleaning rotation for a shared household
#[derive(Parser, Debug)]
#[command(name = "pratac", version)]
#[command(about = "Print who cleans what this week")]
struct Cli {
    /// Configuration file (overrides PRATAC_CONFIG and the per-user default)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Participant name or alias, or "all"
    person: Option<String>,

    /// Weeks to shift from the current week
    #[arg(allow_negative_numbers = true)]
    week_offset: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new configuration interactively
    Init {
        /// Write the built-in defaults without asking
        #[arg(long)]
        defaults: bool,
        /// Overwrite an existing configuration without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Print the rotation for several weeks
    Plan {
        #[arg(long, default_value_t = 4)]
        weeks: usize,
        /// First week, relative to the current one
        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        from: i64,
    },
    /// Write the rotation for several weeks to a file
    Export {
        path: PathBuf,
        #[arg(long, default_value_t = 4)]
        weeks: usize,
        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        from: i64,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Change the rotation start date
    SetStart { date: String },
    AddParticipant {
        name: String,
        #[arg(long = "alias")]
        aliases: Vec<String>,
    },
    RemoveParticipant { name: String },
    AddAlias { name: String, alias: String },
    RemoveAlias { name: String, alias: String },
    AddArea { area: String },
    RemoveArea { area: String },
    /// Replace the configuration with the built-in defaults
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "pratac=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn format_week_header(week: i64, from: NaiveDate, to: NaiveDate) -> String {
    format!(
        "Week {} ({} to {})",
        week,
        from.format(DATE_FORMAT),
        to.format(DATE_FORMAT)
    )
}

fn render_plan_as_text_table(plan: &[WeekSchedule], persons: &PersonOffset) -> String {
    let mut header: Vec<String> = vec!["week".into(), "from".into(), "to".into()];
    header.extend(persons.entries().iter().map(|e| e.name.clone()));
    header.push("unassigned".into());

    let rows: Vec<Vec<String>> = plan
        .iter()
        .map(|week| {
            let mut row = vec![
                week.week_offset.to_string(),
                week.starts_on.format(DATE_FORMAT).to_string(),
                week.ends_on.format(DATE_FORMAT).to_string(),
            ];
            row.extend(persons.entries().iter().map(|e| {
                week.area_for(&e.name).unwrap_or_default().to_string()
            }));
            row.push(week.unassigned.join(", "));
            row
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (cell, w) in cells.iter().zip(&widths) {
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(w - cell.chars().count()));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&header));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out
}

fn print_config(store: &JsonConfigStore, config: &Configuration) -> pratac::Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| PratacError::InvalidConfig(e.to_string()))?;
    if store.exists() {
        println!("# {}", store.path().display());
    } else {
        println!("# {} (not saved yet, showing defaults)", store.path().display());
    }
    println!("{json}");
    Ok(())
}

fn run_init(
    store: &JsonConfigStore,
    clock: &dyn Clock,
    defaults: bool,
    force: bool,
) -> pratac::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if store.exists() && !force {
        let prompt = format!(
            "A configuration already exists at {}. Overwrite?",
            store.path().display()
        );
        if !confirm(&mut input, &mut output, &prompt)? {
            println!("Keeping the existing configuration.");
            return Ok(());
        }
    }

    let config = if defaults {
        Configuration::default()
    } else {
        prompt_configuration(&mut input, &mut output, clock.today())?
    };
    store.save(&config)?;
    println!("Configuration saved to {}.", store.path().display());
    Ok(())
}

fn run_config(store: &JsonConfigStore, action: Option<ConfigAction>) -> pratac::Result<()> {
    let mut config = store.load()?;
    match action {
        None | Some(ConfigAction::Show) => return print_config(store, &config),
        Some(ConfigAction::Path) => {
            println!("{}", store.path().display());
            return Ok(());
        }
        Some(ConfigAction::SetStart { date }) => config.set_start_date(parse_date(&date)?),
        Some(ConfigAction::AddParticipant { name, aliases }) => {
            config.add_participant(&name, &aliases)?
        }
        Some(ConfigAction::RemoveParticipant { name }) => config.remove_participant(&name)?,
        Some(ConfigAction::AddAlias { name, alias }) => config.add_alias(&name, &alias)?,
        Some(ConfigAction::RemoveAlias { name, alias }) => config.remove_alias(&name, &alias)?,
        Some(ConfigAction::AddArea { area }) => config.add_area(&area)?,
        Some(ConfigAction::RemoveArea { area }) => config.remove_area(&area)?,
        Some(ConfigAction::Reset) => config = Configuration::default(),
    }
    config.validate()?;
    store.save(&config)?;
    println!("Configuration updated.");
    print_config(store, &config)
}

fn run_lookup(
    store: &JsonConfigStore,
    clock: &dyn Clock,
    person: &str,
    manual_offset: i64,
) -> pratac::Result<()> {
    let config = store.load()?;
    let week = current_week_offset(clock, &config, manual_offset)?;
    let persons = PersonOffset::build(&config)?;
    let rooms = RoomOffset::build(&config);

    if persons.resolve(person) == Some(PersonSlot::All) {
        let schedule = week_schedule(&config, week)?;
        println!(
            "{}",
            format_week_header(week, schedule.starts_on, schedule.ends_on)
        );
        for a in &schedule.assignments {
            println!("  {}: {}", a.participant, a.area);
        }
        if !schedule.unassigned.is_empty() {
            println!("  unassigned: {}", schedule.unassigned.join(", "));
        }
        return Ok(());
    }

    let assignments = assign(person, week, &persons, &rooms)?;
    let (from, to) = week_range(config.start_date()?, week)?;
    println!("{}", format_week_header(week, from, to));
    for a in &assignments {
        println!("  {}: {}", a.participant, a.area);
    }
    Ok(())
}

fn run(cli: Cli) -> pratac::Result<()> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let store = JsonConfigStore::new(path);
    let fixed;
    let clock: &dyn Clock = match cli.today.as_deref() {
        Some(date) => {
            fixed = FixedClock(parse_date(date)?);
            &fixed
        }
        None => &SystemClock,
    };

    match cli.command {
        Some(Command::Init { defaults, force }) => run_init(&store, clock, defaults, force),
        Some(Command::Config { action }) => run_config(&store, action),
        Some(Command::Plan { weeks, from }) => {
            let config = store.load()?;
            let first = current_week_offset(clock, &config, from)?;
            let plan = rotation_plan(&config, first, weeks)?;
            let persons = PersonOffset::build(&config)?;
            println!("{}", render_plan_as_text_table(&plan, &persons));
            Ok(())
        }
        Some(Command::Export {
            path,
            weeks,
            from,
            format,
        }) => {
            let config = store.load()?;
            let first = current_week_offset(clock, &config, from)?;
            let plan = rotation_plan(&config, first, weeks)?;
            match format {
                ExportFormat::Csv => save_plan_to_csv(&plan, &path)?,
                ExportFormat::Json => save_plan_to_json(&plan, &path)?,
            }
            println!("Exported {} week(s) to {}.", plan.len(), path.display());
            Ok(())
        }
        None => match cli.person.as_deref() {
            Some(person) => run_lookup(&store, clock, person, cli.week_offset.unwrap_or(0)),
            None => {
                let mut help = Cli::command();
                let _ = help.print_help();
                println!();
                Ok(())
            }
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = io::stdout().flush();
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
