//! Application related stuff

use clap::Parser;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// System wide options.
#[derive(Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for photon casting.
    #[clap(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for photon casting. 0 uses all logical CPUs."
    )]
    n_threads: usize,

    /// Suppress all text output other than error messages.
    #[clap(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Emit per-cell detail while the job runs.
    #[clap(long, help = "Emit per-cell detail while the job runs.")]
    pub verbose: bool,

    /// Path to the report file.
    #[clap(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        help = "Write the measurement report to the given filename."
    )]
    pub output_file: Option<String>,

    /// Override for the number of photons cast per measurement cell.
    #[clap(
        long = "photons",
        short = 'n',
        value_name = "NUM",
        help = "Cast the specified number of photons per measurement cell."
    )]
    pub photons: Option<usize>,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}
