//! The cleaning loop: prepare, classify, filter and emit each line in order.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::classifier::classify;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::filters::FilterChain;
use crate::output::OutputAssembler;
use crate::preprocess::prepare_line;
use crate::repair::RepairState;
use crate::resources::Resources;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines: usize,
    pub tokens: usize,
    pub emitted: usize,
    pub rejected: usize,
}

/// Decode bytes as UTF-8, dropping invalid sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Line boundaries besides `\n`: a lone `\r` and the Unicode separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\r' | '\u{b}' | '\u{c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Lines of `input`, decoded permissively. `\r\n` counts as one break.
pub fn decode_lines<R: BufRead>(input: R) -> impl Iterator<Item = io::Result<String>> {
    input.split(b'\n').flat_map(|chunk| match chunk {
        Ok(bytes) => {
            let text = decode_lossy(&bytes);
            let text = text.strip_suffix('\r').unwrap_or(&text);
            text.split(is_line_break)
                .map(|line| Ok(line.to_string()))
                .collect::<Vec<_>>()
        }
        Err(e) => vec![Err(e)],
    })
}

/// Sequential line cleaner. Dictionary repair state lives here and is
/// shared by every line of the run.
pub struct Cleaner {
    config: PipelineConfig,
    resources: Resources,
    state: RepairState,
    output: OutputAssembler,
    stats: RunStats,
}

impl Cleaner {
    pub fn new(config: PipelineConfig, resources: Resources) -> Result<Self> {
        if config.strip_nondict && resources.dictionary.is_none() {
            return Err(Error::MissingResource("dictionary"));
        }
        if config.strip_stopwords && resources.stopwords.is_empty() {
            info!("Stopword stripping enabled with an empty stopword set");
        }
        let output = OutputAssembler {
            maintain_newlines: config.maintain_newlines,
            rejects_only: config.emit_rejects_only,
        };
        Ok(Self {
            config,
            resources,
            state: RepairState::new(),
            output,
            stats: RunStats::default(),
        })
    }

    pub fn state(&self) -> &RepairState {
        &self.state
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Clean one raw line and return its emission set: the kept tokens, or
    /// in reject-only mode the words rejected while cleaning this line.
    pub fn clean_line(&mut self, line: &str) -> Vec<String> {
        self.stats.lines += 1;
        self.state.set_line(self.stats.lines);
        let mark = self.state.ledger.len();

        let prepared = prepare_line(line, &self.config, &self.resources.emojis);
        let tokens = classify(&prepared, self.config.token_mode());

        let chain = FilterChain::new(
            &self.config,
            &self.resources.stopwords,
            self.resources.oracles(),
        );
        let cleaned: Vec<String> = tokens
            .iter()
            .filter_map(|token| chain.apply(token, &mut self.state))
            .collect();

        let rejects = self.state.ledger.since(mark);
        let selected = self.output.select(&cleaned, rejects).to_vec();

        self.stats.tokens += tokens.len();
        self.stats.rejected += rejects.len();
        self.stats.emitted += selected.len();
        selected
    }

    /// Clean every line of `input` into `out`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<RunStats> {
        for line in decode_lines(input) {
            let line = line?;
            let items = self.clean_line(&line);
            self.output.write_line(out, &items)?;
        }
        out.flush()?;

        info!(
            lines = self.stats.lines,
            tokens = self.stats.tokens,
            emitted = self.stats.emitted,
            rejected = self.stats.rejected,
            "Cleaning complete"
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_decode_drops_invalid_sequences() {
        assert_eq!(decode_lossy(b"caf\xc3\xa9 \xff\xfeok"), "caf\u{e9} ok");
        let lines: Vec<String> = decode_lines(&b"one\n\xfftwo\r\n"[..])
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_decode_breaks_on_carriage_returns_and_separators() {
        let lines: Vec<String> = decode_lines("mac\rstyle\r\rend\u{2028}x\n\n".as_bytes())
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["mac", "style", "", "end", "x", ""]);
    }

    #[test]
    fn test_missing_dictionary_rejected() {
        let config = PipelineConfig {
            strip_nondict: true,
            ..PipelineConfig::default()
        };
        let err = Cleaner::new(config, Resources::default()).err().unwrap();
        assert!(matches!(err, Error::MissingResource("dictionary")));
    }

    #[test]
    fn test_carry_survives_line_boundary() {
        let dict: HashSet<String> = ["UNBELIEVABLE".to_string()].into_iter().collect();
        let resources = Resources {
            dictionary: Some(Box::new(dict)),
            ..Resources::default()
        };
        let config = PipelineConfig {
            strip_nondict: true,
            allow_merge: true,
            ..PipelineConfig::default()
        };
        let mut cleaner = Cleaner::new(config, resources).unwrap();

        assert!(cleaner.clean_line("un").is_empty());
        assert_eq!(cleaner.clean_line("believable"), vec!["unbelievable"]);
        assert_eq!(cleaner.state().ledger.entries(), &["un"]);
    }

    #[test]
    fn test_run_writes_stream() {
        let config = PipelineConfig {
            maintain_newlines: true,
            strip_punct: true,
            ..PipelineConfig::default()
        };
        let mut cleaner = Cleaner::new(config, Resources::default()).unwrap();
        let mut out = Vec::new();
        let stats = cleaner
            .run(&b"Hello, world!\n\nsecond line\n"[..], &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Hello world\n\nsecond line\n"
        );
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.emitted, 4);
        assert_eq!(cleaner.stats(), stats);
    }
}
