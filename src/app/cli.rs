use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::search::Strategy;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Generates the most probable tagged sentence from a word-transition graph.", long_about = None)]
pub struct Cli {
    /// Graph file with one `word/TAG//word/TAG/PROBABILITY` transition per line
    pub graph_file: PathBuf,

    /// Starting word for the generated sentence
    #[clap(short = 'w', long)]
    pub start_word: String,

    /// Comma-separated part-of-speech tags, e.g. NNP,VBD,DT,NN
    #[clap(short, long, value_delimiter = ',', required = true)]
    pub spec: Vec<String>,

    /// Search strategy; all three run when omitted
    #[clap(short = 't', long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Also write the rendered results to this file
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress verbose output, only printing results and errors.
    #[clap(short, long)]
    pub quiet: bool,
}

/// Command-line spelling of the search strategies.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StrategyArg {
    BreadthFirst,
    DepthFirst,
    Greedy,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::BreadthFirst => Strategy::BreadthFirst,
            StrategyArg::DepthFirst => Strategy::DepthFirst,
            StrategyArg::Greedy => Strategy::Greedy,
        }
    }
}
