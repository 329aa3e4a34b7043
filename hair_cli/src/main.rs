use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use hair_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hairline")]
#[command(about = "Hair profile matching and care calendar generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify porosity from treatment history
    Porosity {
        /// none, coloring, bleaching, straightening-relaxing, multiple-treatments
        #[arg(long, default_value = "none")]
        chemical: ChemicalTreatment,

        /// never, occasionally, frequent
        #[arg(long, default_value = "never")]
        heat: HeatToolUsage,

        /// fine, medium, thick
        #[arg(long, default_value = "medium")]
        texture: HairTexture,
    },

    /// Find the catalog profile for a set of hair characteristics
    Match {
        /// straight, wavy, curly, coily
        #[arg(long)]
        curvature: Curvature,

        /// oily, normal, dry, mixed
        #[arg(long)]
        oiliness: Oiliness,

        /// low, medium, high (classified from the other answers if omitted)
        #[arg(long)]
        porosity: Option<Porosity>,

        #[arg(long, default_value = "none")]
        chemical: ChemicalTreatment,

        #[arg(long, default_value = "never")]
        heat: HeatToolUsage,

        #[arg(long, default_value = "medium")]
        texture: HairTexture,

        /// Follow the matched profile from now on (restarts the cycle)
        #[arg(long)]
        save: bool,
    },

    /// Show the care calendar for a cycle week
    Calendar {
        /// Profile id (defaults to the saved profile)
        #[arg(long)]
        profile: Option<String>,

        /// Cycle week 1-3 (defaults to the saved week)
        #[arg(long)]
        week: Option<CycleWeek>,

        /// Any date in the week to show (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show today's routine
    Today {
        #[arg(long)]
        profile: Option<String>,

        #[arg(long)]
        week: Option<CycleWeek>,

        #[arg(long)]
        json: bool,
    },

    /// Show the routine template for a single activity
    Details {
        #[arg(long)]
        profile: Option<String>,

        /// wash, cowash, refresh, rest
        #[arg(long)]
        activity: Activity,

        /// hydration, nutrition, reconstruction (wash days only)
        #[arg(long)]
        treatment: Option<Treatment>,
    },

    /// Advance the saved cycle week (3 wraps to 1)
    NextWeek,

    /// Inspect the profile catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all profiles
    List,

    /// Validate a catalog file (or the configured catalog)
    Validate {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    hair_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }

    match cli.command {
        Commands::Porosity {
            chemical,
            heat,
            texture,
        } => {
            println!("{}", classify_porosity(chemical, heat, texture));
            Ok(())
        }
        Commands::Match {
            curvature,
            oiliness,
            porosity,
            chemical,
            heat,
            texture,
            save,
        } => cmd_match(
            &config,
            HairCharacteristics {
                curvature,
                oiliness,
                porosity,
                chemical_treatments: chemical,
                heat_tool_usage: heat,
                hair_texture: texture,
            },
            save,
        ),
        Commands::Calendar {
            profile,
            week,
            start,
            json,
        } => cmd_calendar(&config, profile, week, start, json),
        Commands::Today {
            profile,
            week,
            json,
        } => cmd_today(&config, profile, week, json),
        Commands::Details {
            profile,
            activity,
            treatment,
        } => cmd_details(&config, profile, activity, treatment),
        Commands::NextWeek => cmd_next_week(&config),
        Commands::Catalog { action } => cmd_catalog(&config, action),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn cmd_match(config: &Config, answers: HairCharacteristics, save: bool) -> Result<()> {
    let catalog = config.catalog()?;
    let porosity = answers.resolved_porosity();

    let Some(profile) = catalog.match_profile(&answers) else {
        println!(
            "No profile matches {} / {} / {} porosity / {}.",
            answers.curvature,
            answers.oiliness,
            porosity,
            if answers.has_chemistry() {
                "chemically treated"
            } else {
                "untreated"
            }
        );
        println!("Please review your answers and complete the questionnaire again.");
        return Ok(());
    };

    display_profile(profile);

    if save {
        RoutineState::update(&config.state_path(), |state| {
            state.select_profile(&profile.id, today());
            Ok(())
        })?;
        println!("\n✓ Profile saved. Your cycle starts at week 1.");
    }

    Ok(())
}

/// Resolve the profile from the flag, falling back to the saved profile
fn resolve_profile<'a>(
    catalog: &'a Catalog,
    state: &RoutineState,
    profile_id: Option<String>,
) -> Result<&'a HairProfile> {
    let id = profile_id.or_else(|| state.profile_id.clone()).ok_or_else(|| {
        Error::State("No profile selected. Run `hairline match ... --save` first.".into())
    })?;

    catalog.get(&id).ok_or(Error::UnknownProfile(id))
}

/// Cycle week to show for the week containing `date`
///
/// `--week` wins; otherwise the saved routine decides, the same way for every
/// command.
fn resolve_week(state: &RoutineState, week: Option<CycleWeek>, date: NaiveDate) -> CycleWeek {
    week.unwrap_or_else(|| state.week_on(date))
}

fn cmd_calendar(
    config: &Config,
    profile_id: Option<String>,
    week: Option<CycleWeek>,
    start: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let catalog = config.catalog()?;
    let state = RoutineState::load(&config.state_path())?;
    let profile = resolve_profile(&catalog, &state, profile_id)?;

    let date = start.unwrap_or_else(today);
    let week = resolve_week(&state, week, date);
    let calendar = generate_weekly_calendar(profile, week, Some(date));

    if json {
        println!("{}", serde_json::to_string_pretty(&calendar)?);
    } else {
        display_calendar(&calendar);
    }
    Ok(())
}

fn cmd_today(
    config: &Config,
    profile_id: Option<String>,
    week: Option<CycleWeek>,
    json: bool,
) -> Result<()> {
    let catalog = config.catalog()?;
    let state = RoutineState::load(&config.state_path())?;
    let profile = resolve_profile(&catalog, &state, profile_id)?;

    let date = today();
    let week = resolve_week(&state, week, date);
    let calendar = generate_weekly_calendar(profile, week, Some(date));
    let day = routine_for_date(&calendar, date);

    if json {
        println!("{}", serde_json::to_string_pretty(day)?);
    } else {
        println!("Week {} of your cycle", calendar.cycle_week);
        display_day(day);
    }
    Ok(())
}

fn cmd_details(
    config: &Config,
    profile_id: Option<String>,
    activity: Activity,
    treatment: Option<Treatment>,
) -> Result<()> {
    let catalog = config.catalog()?;
    let state = RoutineState::load(&config.state_path())?;
    let profile = resolve_profile(&catalog, &state, profile_id)?;

    let details = build_details(activity, treatment, profile);
    println!("\n{} {}  ({})", details.icon, details.title, details.duration_label);
    println!("  {}", details.description);
    print_steps(&details.products, &details.steps);
    Ok(())
}

fn cmd_next_week(config: &Config) -> Result<()> {
    let state = RoutineState::update(&config.state_path(), |state| {
        state.advance(today());
        Ok(())
    })?;
    println!("✓ Now on cycle week {}", state.cycle_week);
    Ok(())
}

fn cmd_catalog(config: &Config, action: CatalogAction) -> Result<()> {
    match action {
        CatalogAction::List => {
            let catalog = config.catalog()?;
            for profile in &catalog.profiles {
                println!(
                    "{:<34} {} wash/week{}",
                    profile.id,
                    profile.wash_days_per_week,
                    if profile.needs_refresh { " + refresh" } else { "" }
                );
            }
            println!("\n{} profiles", catalog.profiles.len());
        }
        CatalogAction::Validate { path } => {
            let catalog = match path {
                Some(path) => Catalog::load_from(&path),
                None => config.catalog().map(|c| c.into_owned()),
            };
            match catalog {
                Ok(catalog) => println!("✓ Catalog valid ({} profiles)", catalog.profiles.len()),
                Err(Error::CatalogValidation(msg)) => {
                    eprintln!("Catalog validation errors:");
                    for error in msg.split("; ") {
                        eprintln!("  - {}", error);
                    }
                    return Err(Error::CatalogValidation("Invalid catalog".into()));
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}

fn display_profile(profile: &HairProfile) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PROFILE {}", profile.id);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} / {} / {} porosity{}",
        profile.curvature,
        profile.oiliness,
        profile.porosity,
        if profile.has_chemistry {
            " / chemically treated"
        } else {
            ""
        }
    );
    println!(
        "  Washes per week: {}{}",
        profile.wash_days_per_week,
        if profile.needs_refresh {
            " (refresh in between)"
        } else {
            ""
        }
    );
    for week in CycleWeek::ALL {
        let letters: String = profile.cycle.week(week).iter().map(|t| t.letter()).collect();
        println!("  Week {}: {}", week, letters);
    }
}

fn display_calendar(calendar: &WeeklyCalendar) {
    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  CYCLE WEEK {} - week of {}",
        calendar.cycle_week, calendar.start_date
    );
    println!("╰─────────────────────────────────────────╯");

    for day in &calendar.days {
        let treatment = day
            .treatment
            .map(|t| format!(" ({})", t.letter()))
            .unwrap_or_default();
        println!(
            "  {} {}  {} {}{}  [{}]",
            day.weekday, day.date, day.icon, day.title, treatment, day.duration_label
        );
    }

    for warning in &calendar.warnings {
        match warning {
            CalendarWarning::MissingTreatment { weekday } => {
                println!("  ⚠ {}: no treatment scheduled for this wash", weekday)
            }
        }
    }
    println!();
}

fn display_day(day: &DayRoutine) {
    println!("\n{} {} - {} {}", day.weekday, day.date, day.icon, day.title);
    println!("  {}", day.description);
    println!("  Duration: {}", day.duration_label);
    print_steps(&day.products, &day.steps);
}

fn print_steps(products: &[String], steps: &[String]) {
    if !products.is_empty() {
        println!("\n  Products:");
        for product in products {
            println!("  • {}", product);
        }
    }
    println!("\n  Steps:");
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();
}
