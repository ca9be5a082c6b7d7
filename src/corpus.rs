//! Corpus utilities over cleaned output: vocabulary summary, per-document
//! word counts and word-list filtering. Documents are lines.

use std::collections::{HashMap, HashSet};
use std::io::{self, BufRead, Write};

use crate::pipeline::decode_lines;

/// Occurrence data for one distinct word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSummary {
    pub word: String,
    pub count: u64,
    pub documents: u64,
}

/// Distinct words in first-seen order with their total count and document
/// frequency. With `single_doc` the whole input is one document.
pub fn summary<R: BufRead>(input: R, single_doc: bool) -> io::Result<Vec<WordSummary>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut words: Vec<WordSummary> = Vec::new();

    for line in decode_lines(input) {
        let line = line?;
        let mut in_document = HashSet::new();
        for token in line.split_whitespace() {
            let idx = match index.get(token) {
                Some(&idx) => idx,
                None => {
                    words.push(WordSummary {
                        word: token.to_string(),
                        count: 0,
                        documents: 0,
                    });
                    index.insert(token.to_string(), words.len() - 1);
                    words.len() - 1
                }
            };
            words[idx].count += 1;
            if in_document.insert(idx) {
                words[idx].documents += 1;
            }
        }
    }

    if single_doc {
        for word in &mut words {
            word.documents = 1;
        }
    }
    Ok(words)
}

/// Word count of each document, or a single total with `single_doc`.
/// Never empty.
pub fn doccount<R: BufRead>(input: R, single_doc: bool) -> io::Result<Vec<usize>> {
    let mut counts = Vec::new();
    for line in decode_lines(input) {
        counts.push(line?.split_whitespace().count());
    }
    if single_doc {
        return Ok(vec![counts.iter().sum()]);
    }
    if counts.is_empty() {
        counts.push(0);
    }
    Ok(counts)
}

/// Copy `input` to `out` without the tokens in `words`, keeping one output
/// line per input line. Returns the number of removed tokens.
pub fn filter_words<R: BufRead, W: Write>(
    input: R,
    words: &HashSet<String>,
    out: &mut W,
) -> io::Result<usize> {
    let mut removed = 0;
    for line in decode_lines(input) {
        let line = line?;
        let kept: Vec<&str> = line
            .split_whitespace()
            .filter(|token| {
                let hit = words.contains(*token);
                removed += usize::from(hit);
                !hit
            })
            .collect();
        writeln!(out, "{}", kept.join(" "))?;
    }
    out.flush()?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_documents() {
        let input = b"apple pear apple\npear plum\n\n";
        let words = summary(&input[..], false).unwrap();
        assert_eq!(
            words,
            vec![
                WordSummary { word: "apple".into(), count: 2, documents: 1 },
                WordSummary { word: "pear".into(), count: 2, documents: 2 },
                WordSummary { word: "plum".into(), count: 1, documents: 1 },
            ]
        );
    }

    #[test]
    fn test_summary_single_document() {
        let words = summary(&b"a b\nb c\n"[..], true).unwrap();
        assert!(words.iter().all(|w| w.documents == 1));
        assert_eq!(words[1].count, 2);
    }

    #[test]
    fn test_doccount() {
        assert_eq!(doccount(&b"a b c\n\nd\n"[..], false).unwrap(), vec![3, 0, 1]);
        assert_eq!(doccount(&b"a b c\n\nd\n"[..], true).unwrap(), vec![4]);
        assert_eq!(doccount(&b""[..], false).unwrap(), vec![0]);
        assert_eq!(doccount(&b""[..], true).unwrap(), vec![0]);
    }

    #[test]
    fn test_filter_words() {
        let words: HashSet<String> = ["the".to_string(), "a".to_string()].into_iter().collect();
        let mut out = Vec::new();
        let removed = filter_words(&b"the cat\ta dog\nthe\n"[..], &words, &mut out).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "cat dog\n\n");
    }
}
