//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use sdpcal_core::constants::{DEFAULT_DATA_FILE, DEFAULT_ENSEMBLE_SIZE, DEFAULT_ITERATIONS};
use sdpcal_core::{OutputSelection, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "sdpcal")]
#[command(version)]
#[command(about = "Calibrate SDP8x6 analog differential-pressure readings under input uncertainty")]
pub struct Cli {
    /// Output to compute: linear-500pa, linear-125pa, sqrt-500pa, sqrt-125pa,
    /// all, or an index 0-4
    #[arg(short = 'S', long, default_value = "all")]
    pub select: OutputSelection,

    /// Number of iterations (Monte Carlo sample count)
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Sample scalar inputs and reduce the results instead of propagating
    /// distributions
    #[arg(short = 'M', long)]
    pub monte_carlo: bool,

    /// Print a JSON document
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Print only "<value> <microseconds>"
    #[arg(short = 'b', long)]
    pub benchmark: bool,

    /// Report processing time
    #[arg(short = 'T', long)]
    pub timing: bool,

    /// Write the output table as CSV
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Where Monte Carlo samples are saved
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Particles per distributional value
    #[arg(long, default_value_t = DEFAULT_ENSEMBLE_SIZE)]
    pub ensemble_size: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Translate parsed flags into a run configuration
    pub fn into_config(self) -> RunConfig {
        let mut config = RunConfig::default()
            .with_selection(self.select)
            .with_iterations(self.iterations)
            .with_monte_carlo(self.monte_carlo)
            .with_json(self.json)
            .with_benchmarking(self.benchmark)
            .with_timing(self.timing)
            .with_data_file(self.data_file)
            .with_ensemble_size(self.ensemble_size);

        if let Some(path) = self.output {
            config = config.with_output_path(path);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdpcal_core::{OutputVariant, ReportMode};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sdpcal").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).into_config();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.report_mode(), ReportMode::Plain { csv: None });
    }

    #[test]
    fn selection_by_name_and_index() {
        assert_eq!(
            parse(&["-S", "sqrt-500pa"]).select,
            OutputSelection::Single(OutputVariant::Sqrt500Pa)
        );
        assert_eq!(
            parse(&["-S", "1"]).select,
            OutputSelection::Single(OutputVariant::Linear125Pa)
        );
        assert_eq!(parse(&["-S", "4"]).select, OutputSelection::All);
    }

    #[test]
    fn unknown_selection_rejected() {
        assert!(Cli::try_parse_from(["sdpcal", "-S", "quadratic"]).is_err());
        assert!(Cli::try_parse_from(["sdpcal", "-S", "5"]).is_err());
    }

    #[test]
    fn monte_carlo_flags() {
        let config = parse(&[
            "-M", "-n", "1000", "-T", "--seed", "7", "--data-file", "samples.txt",
        ])
        .into_config();

        assert!(config.monte_carlo);
        assert!(config.timing);
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.data_file, PathBuf::from("samples.txt"));
    }

    #[test]
    fn benchmark_wins_over_json_and_csv() {
        let config = parse(&["-b", "-j", "-o", "out.csv"]).into_config();
        assert_eq!(config.report_mode(), ReportMode::Benchmark);
        assert!(config.needs_timing());
    }

    #[test]
    fn csv_path_only_used_in_plain_mode() {
        let config = parse(&["-o", "out.csv"]).into_config();
        assert_eq!(
            config.report_mode(),
            ReportMode::Plain {
                csv: Some(PathBuf::from("out.csv"))
            }
        );
    }
}
