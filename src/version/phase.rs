//! Classification of the letters inside a version segment
//!
//! Letters in version identifiers typically name a development phase
//! ("alpha", "rc", "SNAPSHOT", ...) but may also be arbitrary code names.
//! Recognized keywords are ordered from least to most mature:
//!
//! ```text
//! Snapshot < PreAlpha < Alpha < Beta < Milestone < ReleaseCandidate < Release < Fix < HotFix
//! ```
//!
//! No letters at all is classified as [`VersionPhase::Release`].

use std::fmt;

use crate::version::comparison::{VersionComparison, VersionMatch};

/// Known phase of a version, ordered by maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionPhase {
    /// Unrecognized letters
    Undefined,
    /// Nightly or snapshot builds (snapshot, nightly, nb, dev)
    Snapshot,
    /// Pre-alpha or preview builds (pre, pre-alpha, test)
    PreAlpha,
    /// Alpha releases (alpha, a)
    Alpha,
    /// Beta releases (beta, b)
    Beta,
    /// Milestone releases (milestone, m)
    Milestone,
    /// Release candidates (rc, cr, release-candidate)
    ReleaseCandidate,
    /// Regular release, either without letters or explicitly (release, ga, final)
    Release,
    /// Bugfix release (fix, bugfix)
    Fix,
    /// Hotfix release (hf, hotfix)
    HotFix,
}

impl VersionPhase {
    /// Keywords recognized for this phase (lower case)
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            VersionPhase::Undefined => &[],
            VersionPhase::Snapshot => &["snapshot", "nightly", "nb", "dev"],
            VersionPhase::PreAlpha => &["pre", "pre-alpha", "test"],
            VersionPhase::Alpha => &["alpha", "a"],
            VersionPhase::Beta => &["beta", "b"],
            VersionPhase::Milestone => &["milestone", "m"],
            VersionPhase::ReleaseCandidate => &["rc", "cr", "release-candidate"],
            VersionPhase::Release => &["", "release", "ga", "final"],
            VersionPhase::Fix => &["fix", "bugfix"],
            VersionPhase::HotFix => &["hf", "hotfix"],
        }
    }

    /// Classifies the given letters case-insensitively.
    ///
    /// Letters joined by `-` that match no keyword as a whole are classified
    /// by their last part, so "beta-SNAPSHOT" is a snapshot. Returns
    /// [`VersionPhase::Undefined`] for letters that match no keyword.
    pub fn from_letters(letters: &str) -> Self {
        const PHASES: [VersionPhase; 9] = [
            VersionPhase::Snapshot,
            VersionPhase::PreAlpha,
            VersionPhase::Alpha,
            VersionPhase::Beta,
            VersionPhase::Milestone,
            VersionPhase::ReleaseCandidate,
            VersionPhase::Release,
            VersionPhase::Fix,
            VersionPhase::HotFix,
        ];
        let lower = letters.to_ascii_lowercase();
        let classify = |keyword: &str| {
            PHASES
                .into_iter()
                .find(|phase| phase.keywords().contains(&keyword))
        };
        classify(lower.as_str())
            .or_else(|| {
                lower
                    .rsplit_once('-')
                    .and_then(|(_, suffix)| classify(suffix))
            })
            .unwrap_or(VersionPhase::Undefined)
    }

    /// Returns true for every recognized phase that marks a version beyond
    /// a plain release, i.e. all but [`VersionPhase::Release`] and
    /// [`VersionPhase::Undefined`].
    pub fn is_development_phase(&self) -> bool {
        !matches!(self, VersionPhase::Release | VersionPhase::Undefined)
    }

    /// Returns true for the release itself and the fixes following it.
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            VersionPhase::Release | VersionPhase::Fix | VersionPhase::HotFix
        )
    }

    /// Checks if a segment with this phase and the given number is valid.
    ///
    /// Milestones and release candidates need a number ("M1", "rc2"),
    /// unrecognized letters are never valid.
    pub fn is_valid(&self, number: Option<u64>) -> bool {
        match self {
            VersionPhase::Undefined => false,
            VersionPhase::Milestone | VersionPhase::ReleaseCandidate => number.is_some(),
            _ => true,
        }
    }
}

/// Letters of a version segment together with their classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum VersionLetters {
    /// No letters
    #[default]
    Empty,
    /// Letters matching a keyword of a [`VersionPhase`]
    Known { letters: String, phase: VersionPhase },
    /// Letters matching no keyword (e.g. code names like "Cupcake")
    Unknown(String),
    /// Implicit letters of a "*!" pattern that also accepts unstable versions
    Unstable,
    /// Aggregate of multiple development phases within one version
    Undefined,
}

impl VersionLetters {
    pub fn of(letters: &str) -> Self {
        if letters.is_empty() {
            return VersionLetters::Empty;
        }
        match VersionPhase::from_letters(letters) {
            VersionPhase::Undefined => VersionLetters::Unknown(letters.to_string()),
            phase => VersionLetters::Known {
                letters: letters.to_string(),
                phase,
            },
        }
    }

    /// The letters as given in the version string (empty for synthetic values)
    pub fn letters(&self) -> &str {
        match self {
            VersionLetters::Known { letters, .. } | VersionLetters::Unknown(letters) => letters,
            VersionLetters::Empty | VersionLetters::Unstable | VersionLetters::Undefined => "",
        }
    }

    pub fn phase(&self) -> VersionPhase {
        match self {
            VersionLetters::Empty => VersionPhase::Release,
            VersionLetters::Known { phase, .. } => *phase,
            VersionLetters::Unknown(_) | VersionLetters::Unstable | VersionLetters::Undefined => {
                VersionPhase::Undefined
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, VersionLetters::Empty)
    }

    /// True for recognized development phases and the unstable wildcard.
    pub fn is_development_phase(&self) -> bool {
        match self {
            VersionLetters::Known { phase, .. } => phase.is_development_phase(),
            VersionLetters::Unstable => true,
            _ => false,
        }
    }

    /// True for [`VersionLetters::Empty`] and for fix phases.
    ///
    /// Meant for the aggregated development phase of a whole version where
    /// empty means that no development phase was found.
    pub fn is_stable(&self) -> bool {
        match self {
            VersionLetters::Empty => true,
            VersionLetters::Known { phase, .. } => phase.is_stable(),
            _ => false,
        }
    }

    pub fn is_unstable(&self) -> bool {
        !self.is_stable()
    }

    pub fn compare_version(&self, other: &VersionLetters) -> VersionComparison {
        if matches!(self, VersionLetters::Unstable) || matches!(other, VersionLetters::Unstable) {
            return VersionComparison::EQUAL_UNSAFE;
        }
        let phase = self.phase();
        let other_phase = other.phase();
        if phase == other_phase {
            if phase != VersionPhase::Undefined {
                return VersionComparison::EQUAL;
            }
            // code names have no defined order
            let ordering = self.letters().cmp(other.letters());
            return VersionComparison::new(ordering, ordering.is_eq());
        }
        let certain = phase != VersionPhase::Undefined && other_phase != VersionPhase::Undefined;
        VersionComparison::new(phase.cmp(&other_phase), certain)
    }

    /// Matches these letters against the letters of another segment.
    ///
    /// Returns [`VersionMatch::Equal`] if the letters match so the caller can
    /// continue, [`VersionMatch::Mismatch`] otherwise. Inside a pattern the
    /// unstable wildcard matches anything and keywords match case-insensitively.
    pub fn matches(&self, other: &VersionLetters, pattern: bool) -> VersionMatch {
        let equal = if pattern {
            matches!(self, VersionLetters::Unstable)
                || self.letters().eq_ignore_ascii_case(other.letters())
        } else {
            self.letters() == other.letters()
        };
        if equal {
            VersionMatch::Equal
        } else {
            VersionMatch::Mismatch
        }
    }
}

impl fmt::Display for VersionLetters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letters())
    }
}
