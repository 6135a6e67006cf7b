//! Version identifiers, patterns and ranges for tool versions
//!
//! Tool releases use all kinds of version schemes ("17.0.8_7", "2023.08.001",
//! "5.2.23.RELEASE", "1.0-rc2"). This module parses them into segments that
//! can be compared, matched against patterns, incremented and combined into
//! ranges.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌───────────────────┐
//! │  Tokenizer  │────▶│   Segment   │────▶│ VersionIdentifier │
//! │  (split)    │     │(cmp, match) │     │ (compare, match)  │
//! └─────────────┘     └─────────────┘     └───────────────────┘
//!                            │                     │
//!                            ▼                     ▼
//!                     ┌─────────────┐     ┌───────────────────┐
//!                     │    Phase    │     │   VersionRange    │
//!                     │  (letters)  │     │ (union, intersect)│
//!                     └─────────────┘     └───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`]: Splits version strings into segments
//! - [`phase`]: Development phases like alpha, beta or rc
//! - [`comparison`]: Comparison results with an unsafe flag
//! - [`segment`]: A single version segment
//! - [`identifier`]: The parsed version with validity and development phase
//! - [`boundary`]: Openness of range bounds
//! - [`range`]: Version ranges and the `GenericVersionRange` abstraction
//! - [`relation`]: How two ranges relate to each other
//! - [`combination`]: Union and intersection of two ranges
//! - [`resolver`]: Resolution of constraints against available versions

pub mod boundary;
pub(crate) mod combination;
pub mod comparison;
pub mod identifier;
pub mod phase;
pub mod range;
pub mod relation;
pub mod resolver;
pub mod segment;
pub(crate) mod tokenizer;

pub use boundary::BoundaryType;
pub use comparison::{VersionComparison, VersionMatch};
pub use identifier::VersionIdentifier;
pub use phase::{VersionLetters, VersionPhase};
pub use range::{GenericVersionRange, VersionConstraint, VersionRange};
pub use relation::VersionRangeRelation;
pub use resolver::{resolve_latest, resolve_version_pattern};
pub use segment::{VersionPattern, VersionSegment};
