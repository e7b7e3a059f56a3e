//! Ordered keyword tables compiled into case-insensitive substring patterns.

use regex::Regex;

use crate::error::{DibieError, Result};

/// Categories tested in order; the first whose keywords occur in a name wins.
#[derive(Debug, Clone)]
pub struct KeywordTable<T> {
    patterns: Vec<(Regex, T)>,
}

impl<T: Copy> KeywordTable<T> {
    /// Compile a table of `(category, keywords)` entries.
    ///
    /// Every entry needs at least one keyword and keywords may not be blank,
    /// otherwise the entry would match every name.
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, K)>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let mut patterns = Vec::new();

        for (category, keywords) in entries {
            let escaped: Vec<String> = keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .map(|k| {
                    if k.is_empty() {
                        Err(DibieError::Config("blank keyword in keyword table".to_string()))
                    } else {
                        Ok(regex::escape(&k))
                    }
                })
                .collect::<Result<_>>()?;

            if escaped.is_empty() {
                return Err(DibieError::Config(
                    "keyword table entry without keywords".to_string(),
                ));
            }

            let pattern = Regex::new(&format!("(?i)(?:{})", escaped.join("|")))?;
            patterns.push((pattern, category));
        }

        Ok(Self { patterns })
    }

    /// First category whose keywords occur anywhere in `name`.
    pub fn lookup(&self, name: &str) -> Option<T> {
        self.patterns
            .iter()
            .find(|(pattern, _)| pattern.is_match(name))
            .map(|(_, category)| *category)
    }

    /// Number of categories in the table.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
