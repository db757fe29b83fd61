use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, PasswordDisplayMode};
use tracing::debug;
use weather_check_core::{
    Fixtures, ScenarioId, SuiteConfig, SuiteReport, Tag,
    logging::{self, LogFormat},
    run_scenarios,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-check", version, about = "Contract checks for the OpenWeatherMap API")]
pub struct Cli {
    /// Debug logging for this run (overrides WEATHER_CHECK_LOG / RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, default_value_t = Format::Human)]
    pub log_format: Format,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
}

impl From<Format> for LogFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => LogFormat::Human,
            Format::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key in the config file.
    Configure,

    /// List the available scenarios and their tags.
    List,

    /// Run scenarios against the API.
    Run {
        /// Scenario name; repeatable. Runs everything when omitted.
        #[arg(long = "scenario", short = 's')]
        scenarios: Vec<String>,

        /// Only run scenarios carrying this tag.
        #[arg(long)]
        tag: Option<String>,

        /// Report format on stdout.
        #[arg(long, value_enum, default_value_t = Format::Human)]
        format: Format,
    },
}

impl Cli {
    /// Returns `true` when at least one scenario failed.
    pub async fn run(self) -> anyhow::Result<bool> {
        logging::init(self.log_format.into(), self.verbose);

        match self.command {
            Command::Configure => {
                configure()?;
                Ok(false)
            }
            Command::List => {
                list();
                Ok(false)
            }
            Command::Run { scenarios, tag, format } => run(&scenarios, tag.as_deref(), format).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = SuiteConfig::load().context("Failed to load configuration")?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    cfg.set_api_key(api_key.trim().to_string());
    let path = cfg.save()?;
    println!("Saved API key to {}", path.display());
    Ok(())
}

fn list() {
    for id in ScenarioId::all() {
        let tags: Vec<&str> = id.tags().iter().map(Tag::as_str).collect();
        let key = if id.requires_api_key() { "" } else { "  (no key needed)" };
        println!("{:<34} {}{}", id.as_str(), tags.join(","), key);
    }
}

fn select(names: &[String], tag: Option<&str>) -> anyhow::Result<Vec<ScenarioId>> {
    let mut ids: Vec<ScenarioId> = if names.is_empty() {
        ScenarioId::all().to_vec()
    } else {
        names
            .iter()
            .map(|n| ScenarioId::try_from(n.as_str()))
            .collect::<Result<_, _>>()?
    };

    if let Some(tag) = tag {
        let tag = Tag::try_from(tag)?;
        ids.retain(|id| id.has_tag(tag));
    }

    Ok(ids)
}

async fn run(names: &[String], tag: Option<&str>, format: Format) -> anyhow::Result<bool> {
    let ids = select(names, tag)?;
    if ids.is_empty() {
        anyhow::bail!("No scenarios match the given filters");
    }

    let config = SuiteConfig::load().context("Failed to load configuration")?;
    let fixtures = Fixtures::from_config(config).context("Failed to load schemas or city list")?;
    debug!(count = ids.len(), base = %fixtures.config().base_url, "running scenarios");

    let started_at = Utc::now();
    let results = run_scenarios(&ids, &fixtures).await;
    let report = SuiteReport::new(started_at, fixtures.config().base_url.clone(), results);

    match format {
        Format::Human => print!("{}", report.render_human()),
        Format::Json => println!("{}", report.to_json()?),
    }

    Ok(report.has_failures())
}
