//! Handles the per-run graph details dump and per-strategy generation.
//!
//! The details dump parses the graph once, up front, purely for logging;
//! each strategy's request then goes through `generator::generate`, which
//! rebuilds its own store. Stores are never shared between requests because
//! node tag buckets are pre-allocated from the spec at construction.

use super::error::AppError;
use super::{verbose_eprintln, verbose_println};
use crate::generator::{self, Generation};
use crate::graph::{GraphParser, SentenceSpec};
use crate::search::Strategy;
use std::fs::File;
use std::io::BufWriter;

/// Parses the graph text and writes every node's edge lists to the details
/// log. Fails on malformed graph text; a details-log write failure is only
/// reported, since the dump is diagnostic.
pub fn log_graph_details(
    graph_text: &str,
    spec: &SentenceSpec,
    quiet_mode: bool,
    details_writer: &mut BufWriter<File>,
) -> Result<(), AppError> {
    verbose_println!(quiet_mode, "[STEP 1] Building transition graph...");
    let store = GraphParser::parse(graph_text, spec)?;
    if store.is_empty() {
        verbose_println!(quiet_mode, "   => Graph text contained no transitions.");
    } else {
        verbose_println!(quiet_mode, "   => Graph holds {} node(s).", store.len());
    }

    verbose_println!(quiet_mode, "   => Logging graph details...");
    if let Err(e) = store.write_details(details_writer) {
        verbose_eprintln!(quiet_mode, "   [ERROR] Failed to write graph details: {}", e);
    }
    Ok(())
}

/// Processes a single generation request against the raw graph text.
///
/// # Arguments
/// * `graph_text` - Raw newline-delimited transition lines.
/// * `start_word` - Word the sentence must start from.
/// * `spec` - The sentence spec for this request.
/// * `strategy` - Which search strategy to run.
/// * `quiet_mode` - Suppresses verbose logging if true.
///
/// # Returns
/// The `Generation` (sentence, probability, nodes considered) on success,
/// or an `AppError` if parsing or search fails.
pub fn process_request(
    graph_text: &str,
    start_word: &str,
    spec: &SentenceSpec,
    strategy: Strategy,
    quiet_mode: bool,
) -> Result<Generation, AppError> {
    verbose_println!(
        quiet_mode,
        "[STEP 2] Searching with {} from '{}'...",
        strategy,
        start_word
    );
    let generation = generator::generate(start_word, spec, strategy, graph_text)?;
    verbose_println!(
        quiet_mode,
        "   => Found a sequence after {} edge candidate(s).",
        generation.nodes_considered
    );

    Ok(generation)
}
