//! The Auto-Refresh Set: verbs for which a 401 triggers refresh-and-retry.

use std::collections::BTreeSet;
use std::fmt;

use kc_core::{Error, HttpVerb, Result};

/// Verbs enabled for transparent refresh. Empty by default, so write calls are
/// never replayed unless asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoRefreshSet(BTreeSet<HttpVerb>);

impl AutoRefreshSet {
    /// The empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses verb names, case-insensitively.
    ///
    /// Any name outside `get`, `post`, `put` and `delete` is a configuration error.
    pub fn parse<I, S>(verbs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        verbs
            .into_iter()
            .map(|verb| {
                let verb = verb.as_ref();
                verb.parse::<HttpVerb>().map_err(|_| {
                    Error::configuration(format!(
                        "unsupported auto_refresh_token verb {verb:?}; allowed values are {}",
                        allowed_verbs()
                    ))
                })
            })
            .collect::<Result<BTreeSet<_>>>()
            .map(Self)
    }

    /// Returns whether a 401 on `verb` should be refreshed away.
    #[must_use]
    pub fn contains(&self, verb: HttpVerb) -> bool {
        self.0.contains(&verb)
    }

    /// Returns whether no verb is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enabled verbs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = HttpVerb> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<HttpVerb> for AutoRefreshSet {
    fn from_iter<I: IntoIterator<Item = HttpVerb>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for AutoRefreshSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(HttpVerb::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

fn allowed_verbs() -> String {
    HttpVerb::ALL
        .iter()
        .map(|verb| verb.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
