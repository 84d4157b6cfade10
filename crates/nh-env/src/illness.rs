//! Illness labels and the catalog injections draw from.

use std::fmt;

use nh_core::SimRng;

/// Label of an illness type, compared by content.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Illness(String);

impl Illness {
    pub fn new(label: &str) -> Self {
        Illness(label.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Illness {
    fn from(s: &str) -> Self {
        Illness::new(s)
    }
}

impl fmt::Display for Illness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed set of illness labels.  Injection picks one uniformly.
#[derive(Clone, Debug)]
pub struct IllnessCatalog {
    labels: Vec<Illness>,
}

impl IllnessCatalog {
    /// Build from labels, dropping duplicates while keeping first-seen order.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut out: Vec<Illness> = Vec::with_capacity(labels.len());
        for l in labels {
            let illness = Illness::new(l.as_ref());
            if !out.contains(&illness) {
                out.push(illness);
            }
        }
        Self { labels: out }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Illness] {
        &self.labels
    }

    /// Uniformly chosen label, `None` for an empty catalog.
    pub fn draw(&self, rng: &mut SimRng) -> Option<Illness> {
        rng.choose(&self.labels).cloned()
    }
}
