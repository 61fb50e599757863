use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use crate::cli::args::{Cli, Commands};
use crate::config::WetBulbConfig;
use crate::logging;
use crate::models::Observation;
use crate::presenter::Presenter;
use crate::session::{Action, Notice, Session};
use crate::weather::{OpenWeatherMapClient, WeatherSource};
use crate::wet_bulb;

const INTERACTIVE_HELP: &str = "\
Commands:
  add <city>      fetch a city and add it to the graph
  remove <city>   remove a city from the graph
  refresh         re-fetch every tracked city
  list            show the current table and summary
  help            show this help
  quit            leave the session";

/// A line typed in an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(Action),
    List,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one interactive input line; blank lines yield `None`
#[must_use]
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match (verb.to_ascii_lowercase().as_str(), rest) {
        ("add", city) if !city.is_empty() => Command::Action(Action::Add(city.to_string())),
        ("remove" | "rm", city) if !city.is_empty() => {
            Command::Action(Action::Remove(city.to_string()))
        }
        ("refresh", "") => Command::Action(Action::Refresh),
        ("list" | "ls", "") => Command::List,
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = WetBulbConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    debug!(
        "Using config from: {}",
        cli.config
            .clone()
            .or_else(WetBulbConfig::get_config_path)
            .map_or_else(|| "defaults".to_string(), |p| p.display().to_string())
    );

    match cli.command {
        Commands::Estimate {
            temperature,
            humidity,
        } => estimate(temperature, humidity),
        Commands::Plot {
            cities,
            add,
            remove,
            output,
        } => {
            let names = if cities.is_empty() {
                config.cities.defaults.clone()
            } else {
                cities
            };
            let client = OpenWeatherMapClient::new(&config.weather)?;
            let presenter = presenter_for(&config, output);
            plot(client, &presenter, &names, add, remove)
        }
        Commands::Interactive { output } => {
            let client = OpenWeatherMapClient::new(&config.weather)?;
            let presenter = presenter_for(&config, output);
            let (mut session, notices) = Session::start(client, &config.cities.defaults);

            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            print_notices(&mut stdout, &notices)?;
            show(&mut stdout, &presenter, &session)?;
            run_interactive(&mut session, &presenter, stdin.lock(), &mut stdout)
        }
    }
}

fn presenter_for(config: &WetBulbConfig, output: Option<PathBuf>) -> Presenter {
    let presenter = Presenter::from_config(config);
    match output {
        Some(path) => presenter.with_output(path),
        None => presenter,
    }
}

fn estimate(temperature: f64, humidity: f64) -> Result<()> {
    let observation = Observation::new(temperature, humidity, Utc::now())?;
    let wet_bulb = wet_bulb::estimate(
        observation.temperature_c,
        observation.relative_humidity_pct,
    );

    println!(
        "Wet-bulb temperature at {} and {} RH: {wet_bulb:.2}°C",
        observation.format_temperature(),
        observation.format_humidity()
    );
    if wet_bulb > wet_bulb::ALERT_THRESHOLD_C {
        println!(
            "⚠️  Above the {:.1}°C danger threshold",
            wet_bulb::ALERT_THRESHOLD_C
        );
    }
    Ok(())
}

fn plot<S: WeatherSource>(
    source: S,
    presenter: &Presenter,
    names: &[String],
    add: Option<String>,
    remove: Option<String>,
) -> Result<()> {
    let mut stdout = std::io::stdout();
    let (mut session, notices) = Session::start(source, names);
    print_notices(&mut stdout, &notices)?;

    for action in add.map(Action::Add).into_iter().chain(remove.map(Action::Remove)) {
        let notices = session.apply(action);
        print_notices(&mut stdout, &notices)?;
    }

    show(&mut stdout, presenter, &session)
}

/// Read commands from `input` until `quit` or end of input
pub fn run_interactive<S, R, W>(
    session: &mut Session<S>,
    presenter: &Presenter,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: WeatherSource,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let Some(command) = parse_command(&line) else {
            continue;
        };
        debug!("Interactive command: {:?}", command);

        match command {
            Command::Action(action) => {
                let notices = session.apply(action);
                print_notices(out, &notices)?;
                show(out, presenter, session)?;
            }
            Command::List => write!(out, "{}", presenter.report(session.dataset()))?,
            Command::Help => writeln!(out, "{INTERACTIVE_HELP}")?,
            Command::Quit => break,
            Command::Unknown(text) => {
                writeln!(out, "Unknown command '{text}'. Type 'help' for commands.")?;
            }
        }
    }

    info!("Interactive session ended");
    Ok(())
}

/// Write the plot and print the report; render failures are shown, not fatal
fn show<S, W: Write>(out: &mut W, presenter: &Presenter, session: &Session<S>) -> Result<()>
where
    S: WeatherSource,
{
    match presenter.present(session.dataset()) {
        Ok(report) => {
            write!(out, "{report}")?;
            writeln!(out, "Plot written to {}", presenter.output.display())?;
        }
        Err(e) => {
            print_notices(out, &[Notice::from(&e)])?;
            write!(out, "{}", presenter.report(session.dataset()))?;
        }
    }
    Ok(())
}

fn print_notices<W: Write>(out: &mut W, notices: &[Notice]) -> Result<()> {
    for notice in notices {
        writeln!(out, "{notice}")?;
    }
    Ok(())
}
