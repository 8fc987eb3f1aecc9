use super::{IOArgs, PathOrStd};
use clap::Subcommand;

mod compare;
pub use compare::{CompareReport, Extrapolation};

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate the population's expected profit at every threshold
    Curve {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Report the threshold(s) of maximum total expected profit
    Optimum {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Compare the total expected profit at two thresholds
    Compare {
        #[command(flatten)]
        io: IOArgs,

        /// The candidate threshold (e.g. the optimum)
        #[arg(short = 'a', long)]
        threshold_a: f64,

        /// The reference threshold (e.g. the classifier's default cut-off)
        #[arg(short = 'b', long)]
        threshold_b: f64,

        /// Extrapolate the per-customer difference to a customer base of this size
        #[arg(short, long)]
        target: Option<usize>,
    },

    /// Print the JSON schema of the scenario document
    Schema {
        /// The output file ("-" implies stdout)
        #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
        output: PathOrStd,
    },
}
