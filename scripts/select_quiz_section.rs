use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use quiz_selector::{
    QuizContentSelector,
    config::Config,
    observability,
    pipeline::select::{RandomSource, RngSource},
};

struct Args {
    lesson: Option<PathBuf>,
    current: Option<String>,
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = parse_args()?;
    let config = Config::from_env().context("failed to load configuration")?;
    observability::init(config.log_format()).context("failed to initialize tracing")?;

    let markdown = match &args.lesson {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read lesson '{}'", path.display()))?,
        None => read_stdin()?,
    };

    let selector = QuizContentSelector::new(config.selector().clone())
        .context("failed to build quiz content selector")?;
    let mut rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::thread()),
    };
    let outcome = selector
        .select(&markdown, args.current.as_deref(), rng.as_mut())
        .context("quiz content selection failed")?;

    let json = serde_json::to_string_pretty(&outcome).context("failed to serialize outcome")?;
    println!("{json}");
    Ok(())
}

fn parse_args() -> Result<Args> {
    let mut lesson = None;
    let mut current = None;
    let mut seed = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lesson" => {
                let value = args.next().context("--lesson requires a path or '-'")?;
                lesson = if value == "-" {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "--current" => {
                let value = args.next().context("--current requires a heading id")?;
                current = Some(value);
            }
            "--seed" => {
                let value = args.next().context("--seed requires an integer")?;
                let parsed = value.parse::<u64>().context("--seed must be an integer")?;
                seed = Some(parsed);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            _ => {
                bail!("unknown argument: {}", arg);
            }
        }
    }

    Ok(Args {
        lesson,
        current,
        seed,
    })
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read lesson from stdin")?;
    Ok(buf)
}

fn print_usage() {
    eprintln!(
        "Usage: select_quiz_section [--lesson <path>|-] [--current <heading-id>] [--seed <n>]\n\n\
         Reads lesson markdown (stdin when --lesson is absent or '-') and prints the\n\
         selected quiz section as JSON."
    );
}
