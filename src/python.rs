use std::fs::File;
use std::io::BufReader;

use clap::Parser;
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::cli::CleanInvocation;
use crate::corpus;
use crate::pipeline::Cleaner;
use crate::resources::Resources;

/// Clean lines with the same flags as `corpus-clean clean`
/// Returns: the output lines
#[pyfunction]
fn clean_lines(lines: Vec<String>, args: Vec<String>) -> PyResult<Vec<String>> {
    let invocation =
        CleanInvocation::try_parse_from(&args).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let config = invocation.args.to_config();
    let options = invocation.args.resource_options();

    let resources = Resources::load(&config, &options)
        .map_err(|e| PyIOError::new_err(e.to_string()))?;
    let mut cleaner =
        Cleaner::new(config, resources).map_err(|e| PyValueError::new_err(e.to_string()))?;

    let input = lines.join("\n");
    let mut out = Vec::new();
    cleaner.run(input.as_bytes(), &mut out)?;

    Ok(String::from_utf8_lossy(&out)
        .lines()
        .map(str::to_string)
        .collect())
}

fn open(file_path: &str) -> PyResult<BufReader<File>> {
    File::open(file_path)
        .map(BufReader::new)
        .map_err(|e| PyIOError::new_err(format!("Failed to read {}: {}", file_path, e)))
}

/// Vocabulary summary of a cleaned file
/// Returns: list of (word, count, documents)
#[pyfunction]
fn summarize_file(file_path: String, single_doc: bool) -> PyResult<Vec<(String, u64, u64)>> {
    let words = corpus::summary(open(&file_path)?, single_doc)?;
    Ok(words
        .into_iter()
        .map(|w| (w.word, w.count, w.documents))
        .collect())
}

/// Word count of each document of a cleaned file
#[pyfunction]
fn count_document_words(file_path: String, single_doc: bool) -> PyResult<Vec<usize>> {
    Ok(corpus::doccount(open(&file_path)?, single_doc)?)
}

#[pymodule]
fn corpus_clean(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(clean_lines, m)?)?;
    m.add_function(wrap_pyfunction!(summarize_file, m)?)?;
    m.add_function(wrap_pyfunction!(count_document_words, m)?)?;
    Ok(())
}
