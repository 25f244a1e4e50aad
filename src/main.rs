use clap::{Parser, Subcommand};
use landing_kit::capability::DeviceCapabilities;
use landing_kit::contact::ContactLinks;
use landing_kit::page::Environment;
use landing_kit::phrases::PhraseSampler;
use landing_kit::{config, output, scenario};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "landing-kit")]
#[command(about = "Behavior toolkit for a single-page contact landing site")]
#[command(long_about = "\
Behavior toolkit for a single-page contact landing site

Runs the page controllers (device tiering, rotating phrases, reveal and
parallax animation, contact links, hover/ripple effects, image loading)
against an in-memory page, so their behavior can be inspected and scripted
without a browser.

Configuration is read from landing.toml in the --config directory when
present; every key is optional and falls back to the stock value.

Run 'landing-kit gen-config' to generate a documented landing.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing landing.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the outbound contact link for a message
    Link {
        /// Message text (defaults to the configured default message)
        message: Option<String>,
    },
    /// Classify a device from its environment signals
    Tier {
        /// Client user-agent string
        #[arg(long, default_value = "")]
        user_agent: String,
        /// Reported device memory in GB
        #[arg(long)]
        memory: Option<f64>,
        /// Reported logical processor count
        #[arg(long)]
        cpus: Option<u32>,
    },
    /// Sample phrases from the configured pool
    Phrases {
        /// Phrases per round (defaults to phrases.count)
        #[arg(short, long)]
        n: Option<usize>,
        /// Number of consecutive rounds to draw
        #[arg(long, default_value_t = 1)]
        rounds: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play a JSON scenario against the page and print what happened
    Simulate {
        /// Scenario file
        scenario: PathBuf,
        /// Print the full report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a stock landing.toml with all options documented
    GenConfig,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let load = || config::load_config(&cli.config);

    match cli.command {
        Command::Link { message } => {
            let site = load()?;
            let links = ContactLinks::new(&site.contact);
            println!("{}", links.build_link(message.as_deref()));
        }
        Command::Tier {
            user_agent,
            memory,
            cpus,
        } => {
            let site = load()?;
            let env = Environment {
                user_agent,
                device_memory: memory,
                hardware_concurrency: cpus,
                ..Default::default()
            };
            let caps = DeviceCapabilities::detect(&env, &site.performance);
            output::print_capabilities(&caps);
        }
        Command::Phrases { n, rounds, seed } => {
            let site = load()?;
            let mut sampler = match seed {
                Some(seed) => PhraseSampler::with_rng(&site.phrases, StdRng::seed_from_u64(seed)),
                None => PhraseSampler::new(&site.phrases),
            };
            let n = n.unwrap_or(site.phrases.count);
            let drawn: Vec<Vec<String>> = (0..rounds).map(|_| sampler.sample(n)).collect();
            output::print_phrase_rounds(&drawn);
        }
        Command::Simulate { scenario: path, json } => {
            let site = load()?;
            let script = scenario::load_scenario(&path)?;
            let report = scenario::run(&script, &site)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_scenario_report(&report);
                println!();
                println!("{}", report.html);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
