use anyhow::{Context, Result};
use clap::{arg, ArgMatches, Command};
use gridworld::ui::*;
use gridworld::*;
use gridworld_rl::*;
use rand::prelude::*;
use serde::Serialize;
use std::{fs, path::Path, thread, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("gridworld-rl")
        .about("Solves a grid world with value iteration and rolls out random and learned policies")
        .arg(
            arg!(--settings <SETTINGS> "Settings json string or path to json file")
                .required(false),
        )
        .arg(
            arg!(--size <N> "Grid side length")
                .required(false)
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--gamma <GAMMA> "Discount factor in (0, 1]")
                .required(false)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--theta <THETA> "Convergence threshold")
                .required(false)
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--density <PERCENT> "Percentage of cells turned into obstacles (0-50)")
                .required(false)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            arg!(--seed <SEED> "Seed for obstacle placement and the random walk")
                .required(false)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--"delay-ms" <MS> "Pause between rendered steps")
                .required(false)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--mode <MODE> "Which rollouts to run")
                .required(false)
                .value_parser(["random", "learned", "both"])
                .default_value("both"),
        )
        .arg(arg!(--json "Print the results as a single json document"))
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<String>("settings") {
        Some(settings) if Path::new(settings).is_file() => {
            let json = fs::read_to_string(settings)
                .with_context(|| format!("Failed to read settings file {settings}"))?;
            Config::from_json(&json)?
        }
        Some(settings) => Config::from_json(settings)?,
        None => Config::default(),
    };

    if let Some(size) = matches.get_one::<usize>("size") {
        config.size = *size;
    }
    if let Some(gamma) = matches.get_one::<f64>("gamma") {
        config.gamma = *gamma;
    }
    if let Some(theta) = matches.get_one::<f64>("theta") {
        config.theta = *theta;
    }
    if let Some(density) = matches.get_one::<u32>("density") {
        config.obstacle_density = *density;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    if let Some(delay_ms) = matches.get_one::<u64>("delay-ms") {
        config.delay_ms = *delay_ms;
    }

    config.validate()?;
    Ok(config)
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a Config,
    env: &'a GridWorld,
    random: Option<Trajectory>,
    values: Option<ValueFunction>,
    policy: Option<GreedyPolicy>,
    learned: Option<Trajectory>,
}

/// Consumes a rollout, drawing every frame unless `quiet`.
fn play<P: Policy>(
    rollout: Rollout<'_, P>,
    env: &GridWorld,
    config: &Config,
    quiet: bool,
) -> Result<Trajectory> {
    let delay = Duration::from_millis(config.delay_ms);
    let mut states = vec![env.start()];
    for state in rollout {
        let state = state?;
        if !quiet {
            println!("{}\n", render_frame(env, &state));
            thread::sleep(delay);
        }
        states.push(state);
    }

    Ok(states.into())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let config = load_config(&matches).context("Invalid configuration")?;
    let json = matches.get_flag("json");
    let mode = matches
        .get_one::<String>("mode")
        .map(String::as_str)
        .unwrap_or("both");

    let rng = &mut match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let env = config.build_env(rng).context("Failed to build the grid world")?;
    info!(
        size = env.size(),
        obstacles = env.obstacles().len(),
        "built grid world"
    );
    if !json {
        println!("{}\n", render_frame(&env, &env.start()));
    }

    let mut report = Report {
        config: &config,
        env: &env,
        random: None,
        values: None,
        policy: None,
        learned: None,
    };

    if mode != "learned" {
        let t = play(random_rollout(&env, rng), &env, &config, json)
            .context("Random rollout failed")?;
        info!(steps = t.steps(), "random walk reached the goal");
        report.random = Some(t);
    }

    if mode != "random" {
        let (values, policy) =
            solve(&env, config.gamma, config.theta).context("Value iteration failed")?;
        if !json {
            println!("Values:\n{}\n", render_values(&env, values.table()));
            println!("Policy:\n{}\n", render_policy(&env, policy.table()));
        }

        let t = play(policy_rollout(&env, &policy), &env, &config, json)
            .context("Learned rollout failed")?;
        info!(steps = t.steps(), "learned policy reached the goal");
        report.values = Some(values);
        report.policy = Some(policy);
        report.learned = Some(t);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
