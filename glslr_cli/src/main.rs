use std::path::PathBuf;

use structopt::StructOpt;

use glslr::parse::ParsingStrategy;
use glslr::transform::TransformationManager;

#[derive(StructOpt)]
#[structopt(name = "glslrc", about = "GLSL source-to-source rewriter", author)]
struct Opts {
    /// Input shader files
    input: Vec<PathBuf>,

    /// Output file (defaults to stdout)
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Parsing strategy: retry, sll or ll
    #[structopt(short, long, default_value = "retry")]
    strategy: Strategy,

    /// Swallow parse errors instead of failing
    #[structopt(long)]
    lenient: bool,
}

struct Strategy(ParsingStrategy);

impl std::str::FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retry" => Ok(Strategy(ParsingStrategy::SllAndLlOnError)),
            "sll" => Ok(Strategy(ParsingStrategy::SllOnly)),
            "ll" => Ok(Strategy(ParsingStrategy::LlOnly)),
            other => Err(anyhow::anyhow!("unknown parsing strategy: {}", other)),
        }
    }
}

#[paw::main]
fn main(opts: Opts) -> anyhow::Result<()> {
    env_logger::init();

    // Concatenate the input files
    let mut source = String::new();
    for path in &opts.input {
        source.push_str(&std::fs::read_to_string(path)?);
        if !source.ends_with('\n') {
            source.push('\n');
        }
    }

    // Run the source through the manager; with no registered transformations this
    // normalizes the input
    let mut manager: TransformationManager<()> = TransformationManager::new();
    manager.set_parsing_strategy(opts.strategy.0);
    manager.set_throw_parse_errors(!opts.lenient);
    let transformed = manager.transform(&source)?;

    // Write output
    if let Some(path) = opts.output {
        use std::io::Write;
        write!(std::fs::File::create(path)?, "{}", transformed)?;
    } else {
        print!("{}", transformed);
    }

    Ok(())
}
