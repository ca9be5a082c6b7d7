//! Output assembly: size policy, emission set selection and serialization.

use std::io::{self, Write};

use crate::classifier::{TokenKind, encoded_len};

/// Minimum token size. Plain words need at least `min_size` characters;
/// special tokens need strictly more than `min_size`, marker included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinSize(pub usize);

impl MinSize {
    pub fn admits(self, kind: TokenKind, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let len = encoded_len(kind, text);
        match kind {
            TokenKind::PlainWord => len >= self.0,
            TokenKind::Special(_) => len > self.0,
        }
    }
}

/// Writes one line's emission set.
#[derive(Debug, Clone, Copy)]
pub struct OutputAssembler {
    pub maintain_newlines: bool,
    pub rejects_only: bool,
}

impl OutputAssembler {
    /// Pick cleaned tokens or the line's new reject ledger entries.
    pub fn select<'a>(&self, tokens: &'a [String], rejects: &'a [String]) -> &'a [String] {
        if self.rejects_only { rejects } else { tokens }
    }

    pub fn write_line<W: Write>(&self, out: &mut W, items: &[String]) -> io::Result<()> {
        if self.maintain_newlines {
            writeln!(out, "{}", items.join(" "))
        } else {
            for item in items.iter().filter(|i| !i.is_empty()) {
                writeln!(out, "{}", item)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_min_size_comparators_differ() {
        let min = MinSize(2);
        assert!(min.admits(TokenKind::PlainWord, "ab"));
        assert!(!min.admits(TokenKind::PlainWord, "a"));
        assert!(!min.admits(TokenKind::Special(Category::Punctuation), "."));
        assert!(min.admits(TokenKind::Special(Category::Hyphen), "ab"));
    }

    #[test]
    fn test_empty_text_never_admitted() {
        assert!(!MinSize(0).admits(TokenKind::PlainWord, ""));
    }

    #[test]
    fn test_one_token_per_line() {
        let assembler = OutputAssembler {
            maintain_newlines: false,
            rejects_only: false,
        };
        let mut out = Vec::new();
        assembler
            .write_line(&mut out, &strings(&["alpha", "", "beta"]))
            .unwrap();
        assembler.write_line(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "alpha\nbeta\n");
    }

    #[test]
    fn test_maintain_newlines() {
        let assembler = OutputAssembler {
            maintain_newlines: true,
            rejects_only: false,
        };
        let mut out = Vec::new();
        assembler
            .write_line(&mut out, &strings(&["alpha", "beta"]))
            .unwrap();
        assembler.write_line(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "alpha beta\n\n");
    }

    #[test]
    fn test_select_rejects() {
        let tokens = strings(&["kept"]);
        let rejects = strings(&["wrod"]);
        let assembler = OutputAssembler {
            maintain_newlines: false,
            rejects_only: true,
        };
        assert_eq!(assembler.select(&tokens, &rejects), &["wrod"]);
    }
}
