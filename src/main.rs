mod data;
mod report;
mod state;

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};

use data::model::{FilterCriteria, DEFAULT_TARGET, DEFAULT_TOLERANCE};
use state::AppState;

const USAGE: &str = "usage: tempring <export.csv> [--target N] [--tolerance N] [--json]";

fn main() -> Result<()> {
    env_logger::init();

    let options = CliOptions::from_args(env::args().skip(1))?;

    let mut state = AppState::default();
    state.set_criteria(options.criteria);
    state.load_from_path(&options.path);

    if let Some(msg) = &state.status_message {
        bail!("{msg}");
    }
    let aggregate = state.aggregate.as_ref().context("no dataset loaded")?;

    if options.json {
        println!("{}", report::render_json(&aggregate.stats, &aggregate.grid)?);
    } else {
        print!("{}", report::render_text(&aggregate.stats, &aggregate.grid));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
struct CliOptions {
    path: PathBuf,
    criteria: FilterCriteria,
    json: bool,
}

impl CliOptions {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut path = None;
        let mut target = DEFAULT_TARGET;
        let mut tolerance = DEFAULT_TOLERANCE;
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--target" | "-t" => {
                    target = args
                        .next()
                        .context("--target expects a value")?
                        .parse()
                        .context("--target expects a number")?;
                }
                "--tolerance" => {
                    tolerance = args
                        .next()
                        .context("--tolerance expects a value")?
                        .parse()
                        .context("--tolerance expects a number")?;
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    println!("{USAGE}");
                    process::exit(0);
                }
                other if !other.starts_with('-') && path.is_none() => {
                    path = Some(PathBuf::from(other));
                }
                other => bail!("unrecognized argument: {other}\n{USAGE}"),
            }
        }

        let path = path.with_context(|| format!("missing export path\n{USAGE}"))?;
        Ok(CliOptions {
            path,
            criteria: FilterCriteria::new(target, tolerance),
            json,
        })
    }
}
