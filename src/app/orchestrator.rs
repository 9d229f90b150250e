//! Main application orchestrator.
//!
//! Coordinates a full run:
//! 1. Initializes logging.
//! 2. Validates and reads the graph file.
//! 3. Initializes a writer for graph details.
//! 4. Runs each requested strategy (all three when none was chosen),
//!    delegating to `processing::process_request`. The verbose log
//!    (`sentgen.log`) is flushed after each strategy if not in quiet mode.
//! 5. Prints the rendered results and optionally writes them to a file.
//!
//! An empty sentence spec is rejected up front, before any strategy runs.
//! Per-strategy search failures (no sequence found, unknown start word) are
//! reported and do not abort the remaining strategies; parse errors do,
//! since no partial graph is usable.

use super::cli::Cli;
use super::error::AppError;
use super::file_handler;
use super::logger;
use super::processing;
use super::{verbose_eprintln, verbose_println};
use crate::graph::SentenceSpec;
use crate::search::{SearchError, Strategy};
use std::io::Write;
use std::path::Path;

/// Runs the main application logic based on parsed command-line arguments.
///
/// # Errors
/// Returns `AppError` on unrecoverable failures: unreadable input, malformed
/// graph text, or a failed results-file write.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    // Initialize the global logger if not in quiet mode. Done once.
    if !quiet_mode {
        if let Err(e) = logger::init_global_logger("sentgen.log") {
            // If logger init fails, print to stderr directly and continue;
            // verbose file logging is simply unavailable.
            eprintln!(
                "Warning: Failed to initialize verbose logger (sentgen.log): {}. Verbose file logging will be unavailable.",
                e
            );
        } else {
            verbose_println!(quiet_mode, "Verbose logging initialized to sentgen.log");
            if let Err(e) = logger::flush_global_logger() {
                verbose_eprintln!(
                    quiet_mode,
                    "[WARNING] Failed to flush sentgen.log after initialization: {}",
                    e
                );
            }
        }
    }

    let graph_text = file_handler::validate_and_read_graph_file(&cli.graph_file, quiet_mode)?;
    let spec: SentenceSpec = cli.spec.iter().cloned().collect();
    if spec.is_empty() {
        verbose_eprintln!(quiet_mode, "Input Error: sentence spec has no tags");
        return Err(AppError::Search(SearchError::EmptySpec));
    }

    verbose_println!(
        quiet_mode,
        "\n============================================================"
    );
    verbose_println!(quiet_mode, "Graph file: {}", cli.graph_file.display());
    verbose_println!(quiet_mode, "Start word: {}", cli.start_word);
    verbose_println!(quiet_mode, "Sentence spec: {:?}", spec.tags());
    verbose_println!(
        quiet_mode,
        "============================================================"
    );

    // One chosen strategy, or all three in a fixed order.
    let strategies: Vec<Strategy> = match cli.strategy {
        Some(arg) => vec![arg.into()],
        None => vec![
            Strategy::BreadthFirst,
            Strategy::DepthFirst,
            Strategy::Greedy,
        ],
    };

    let details_log_path = Path::new("graph_details.log");
    let mut details_writer = file_handler::init_details_log_writer(details_log_path).map_err(|e| {
        verbose_eprintln!(
            quiet_mode,
            "[ERROR] Failed to open graph details log ({}): {}",
            details_log_path.display(),
            e
        );
        AppError::Io(e)
    })?;

    // One details dump per run; every strategy sees the same graph.
    processing::log_graph_details(&graph_text, &spec, quiet_mode, &mut details_writer)?;
    if let Err(e) = details_writer.flush() {
        verbose_eprintln!(
            quiet_mode,
            "[WARNING] Failed to flush graph details log ({}): {}. Some graph data might be lost.",
            details_log_path.display(),
            e
        );
    }

    let mut rendered_results: Vec<String> = Vec::new();

    for strategy in strategies {
        verbose_println!(
            quiet_mode,
            "\n------------------------------------------------------------"
        );
        verbose_println!(quiet_mode, "Strategy: {}", strategy);
        verbose_println!(
            quiet_mode,
            "------------------------------------------------------------"
        );

        match processing::process_request(&graph_text, &cli.start_word, &spec, strategy, quiet_mode)
        {
            Ok(generation) => {
                rendered_results.push(format!("{}\n------------------\n{}", strategy, generation));
            }
            Err(AppError::Search(e)) => {
                verbose_eprintln!(quiet_mode, "[ERROR] {}: {}", strategy, e);
                rendered_results.push(format!("{}\n------------------\nNo result: {}", strategy, e));
            }
            Err(e) => {
                // Parse and I/O failures poison the whole run.
                return Err(e);
            }
        }

        // Flush the verbose log after each strategy if not in quiet mode.
        if !quiet_mode {
            if let Err(e) = logger::flush_global_logger() {
                eprintln!(
                    "[WARNING] Failed to flush sentgen.log after strategy {}: {}",
                    strategy, e
                );
            }
        }
    }

    let combined = rendered_results.join("\n\n");
    println!("{}", combined);

    if let Some(output_path) = &cli.output {
        match file_handler::write_content_to_file(output_path, &combined) {
            Ok(_) => {
                verbose_println!(
                    quiet_mode,
                    "\n[INFO] Results written to {}",
                    output_path.display()
                );
            }
            Err(e) => {
                verbose_eprintln!(
                    quiet_mode,
                    "[ERROR] Failed to write results file ({}): {}",
                    output_path.display(),
                    e
                );
                return Err(AppError::Io(e));
            }
        }
    }

    // Final flush of sentgen.log before exiting successfully.
    if !quiet_mode {
        if let Err(e) = logger::flush_global_logger() {
            eprintln!(
                "[WARNING] Failed to perform final flush of sentgen.log: {}",
                e
            );
        }
        println!(
            "\nSee 'sentgen.log' for verbose output and 'graph_details.log' for the parsed graph."
        );
    }

    Ok(())
}
