//! Keyword normalization for jm.
//!
//! Turns résumé text into a short, ranked list of salient lowercase terms: noise such as contact
//! details and dates is stripped and stopwords are dropped. Skill acronym expansion is
//! available as an opt-in.

#![warn(missing_docs)]

mod acronyms;
mod clean;
mod keywords;
mod normalize;
mod stopwords;

pub use acronyms::expand_acronyms;
pub use clean::strip_noise;
pub use keywords::{Keyword, KeywordSet};
pub use normalize::{DEFAULT_KEYWORD_LIMIT, Normalizer};
pub use stopwords::Stopwords;
