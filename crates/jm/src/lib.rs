//! jm: Job Matcher
//!
//! Ranks a dataset of job postings against a résumé. The résumé (PDF or DOCX) is reduced to
//! text and keywords, every posting is scored by lexical TF-IDF or sentence-embedding cosine
//! similarity, and the best postings are printed as a table, JSON or CSV.

#![warn(missing_docs)]

pub mod cli;
pub mod dataset;
