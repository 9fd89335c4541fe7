use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

// Matched against a token with all whitespace already removed. ASCII digits
// only: `\d` would also accept other Unicode digits that `u64` cannot parse.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)(?:-([0-9]+))?$").expect("token pattern is valid"));

/// How the parser treats tokens it cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePolicy {
    /// Skip malformed tokens and out-of-range single pages instead of failing.
    pub lenient_token_parse: bool,
}

impl ParsePolicy {
    pub const LENIENT: ParsePolicy = ParsePolicy {
        lenient_token_parse: true,
    };
    pub const STRICT: ParsePolicy = ParsePolicy {
        lenient_token_parse: false,
    };
}

impl Default for ParsePolicy {
    fn default() -> Self {
        ParsePolicy::LENIENT
    }
}

/// One comma-separated piece of a page range expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Single(u64),
    Span(u64, u64),
}

impl PageToken {
    /// Parse a token like "5" or "2-7". Whitespace anywhere is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let caps = TOKEN.captures(&compact)?;

        let start = parse_number(caps.get(1)?.as_str());
        match caps.get(2) {
            Some(end) => Some(PageToken::Span(start, parse_number(end.as_str()))),
            None => Some(PageToken::Single(start)),
        }
    }

    /// Resolve against a document of `max_page` pages.
    ///
    /// Span endpoints are clamped into `[1, max_page]` (so "999-999" on a
    /// 10 page document is page 10), while a single page outside that
    /// interval resolves to nothing.
    pub fn resolve(&self, max_page: u32) -> Option<RangeInclusive<u32>> {
        if max_page == 0 {
            return None;
        }
        let max = u64::from(max_page);

        match *self {
            PageToken::Single(n) => {
                if (1..=max).contains(&n) {
                    Some(n as u32..=n as u32)
                } else {
                    None
                }
            }
            PageToken::Span(a, b) => {
                let (lo, hi) = if a > b { (b, a) } else { (a, b) };
                let lo = lo.clamp(1, max) as u32;
                let hi = hi.clamp(1, max) as u32;
                Some(lo..=hi)
            }
        }
    }
}

// The token pattern guarantees ASCII digits, so the only failure is overflow.
fn parse_number(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// A deduplicated, ascending set of 1-based page numbers, all within
/// `1..=total_pages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSet {
    pages: BTreeSet<u32>,
    total_pages: u32,
}

impl PageSet {
    /// Parse a comma-separated page range expression like "1-3, 5, 8-8".
    pub fn parse(input: &str, max_page: u32, policy: ParsePolicy) -> Result<Self> {
        let mut pages = BTreeSet::new();

        for raw in input.split(',') {
            if raw.trim().is_empty() {
                continue;
            }

            let Some(token) = PageToken::parse(raw) else {
                if policy.lenient_token_parse {
                    tracing::debug!(token = raw.trim(), "skipping malformed page token");
                    continue;
                }
                return Err(Error::InvalidToken(raw.trim().to_string()));
            };

            match token.resolve(max_page) {
                Some(range) => pages.extend(range),
                None if policy.lenient_token_parse => {
                    tracing::debug!(?token, max_page, "dropping out-of-range page");
                }
                None => {
                    let page = match token {
                        PageToken::Single(n) | PageToken::Span(n, _) => n,
                    };
                    return Err(Error::PageOutOfRange {
                        page,
                        total: max_page,
                    });
                }
            }
        }

        Ok(PageSet {
            pages,
            total_pages: max_page,
        })
    }

    /// Every page of a `total_pages` document.
    pub fn all(total_pages: u32) -> Self {
        PageSet {
            pages: (1..=total_pages).collect(),
            total_pages,
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    /// Pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }
}

impl fmt::Display for PageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", page)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn parse_page_set(input: &str, max_page: u32) -> PageSet {
    PageSet::parse(input, max_page, ParsePolicy::LENIENT).unwrap()
}
