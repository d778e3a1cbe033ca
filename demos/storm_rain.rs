use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bayes_rs::network::{Algorithm, BayesianNetwork};
use bayes_rs::node::NodeDescriptor;
use bayes_rs::query::Query;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum AlgorithmArg {
    Prior,
    Rejection,
    Likelihood,
    All,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for simplelog::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => simplelog::LevelFilter::Error,
            LogLevel::Warn => simplelog::LevelFilter::Warn,
            LogLevel::Info => simplelog::LevelFilter::Info,
            LogLevel::Debug => simplelog::LevelFilter::Debug,
            LogLevel::Trace => simplelog::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of samples per query.
    #[clap(long, value_name = "INT", default_value = "10000")]
    samples: usize,

    /// Random seed.
    #[clap(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Sampling algorithm.
    #[clap(long, value_enum, default_value = "all")]
    algorithm: AlgorithmArg,

    /// Log level.
    #[clap(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level.into(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    // Storm -> Rain
    let net = BayesianNetwork::new(vec![
        NodeDescriptor::root("Storm", 0.7),
        NodeDescriptor::with_probabilities("Rain", ["Storm"], &[0.3, 0.7])?,
    ])?;
    for node in net.nodes() {
        println!("{}", node);
    }

    let algorithms: Vec<Algorithm> = match args.algorithm {
        AlgorithmArg::Prior => vec![Algorithm::Prior],
        AlgorithmArg::Rejection => vec![Algorithm::Rejection],
        AlgorithmArg::Likelihood => vec![Algorithm::LikelihoodWeighting],
        AlgorithmArg::All => Algorithm::ALL.to_vec(),
    };

    let queries = [Query::new(["Storm"]), Query::new(["Rain"]).given("Storm", false)];

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    for algorithm in algorithms {
        for q in &queries {
            let time = std::time::Instant::now();
            let res = net.query(q, algorithm, args.samples, &mut rng)?;
            println!(
                "{} p({:?} | {:?}) in {:.3}s:\n{}",
                algorithm,
                q.query_variables,
                q.evidence,
                time.elapsed().as_secs_f64(),
                res
            );
        }
    }

    Ok(())
}
