//! Job postings from CSV, and CSV export of ranked results.
//!
//! The dataset is a CSV file with a header row. Column names come from
//! [`DatasetSettings`]; only the description column is required.

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Writer};
use jm_config::DatasetSettings;
use jm_match::{Corpus, Posting, SimilarityResult};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reading or writing postings.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset {path}: {source}")]
    Open {
        /// Dataset path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The dataset is not valid CSV.
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        /// Dataset path.
        path: PathBuf,
        /// Parser error, with position.
        source: csv::Error,
    },

    /// None of the description column candidates is in the header.
    #[error("{path} has no description column (looked for: {candidates})")]
    MissingColumn {
        /// Dataset path.
        path: PathBuf,
        /// Comma-separated candidate names.
        candidates: String,
    },

    /// The export file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Export path.
        path: PathBuf,
        /// Writer error.
        source: csv::Error,
    },
}

/// Header positions of the configured columns.
#[derive(Debug)]
struct Columns {
    /// Posting text.
    description: usize,
    /// Job title.
    title: Option<usize>,
    /// Company name.
    company: Option<usize>,
    /// Location parts, in join order.
    location: Vec<usize>,
    /// Link.
    link: Option<usize>,
    /// Skills list.
    skills: Option<usize>,
}

impl Columns {
    /// Maps configured names onto header positions.
    fn resolve(
        headers: &StringRecord,
        settings: &DatasetSettings,
        path: &Path,
    ) -> Result<Self, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let description = settings
            .description_column
            .iter()
            .find_map(|name| find(name))
            .ok_or_else(|| DatasetError::MissingColumn {
                path: path.to_path_buf(),
                candidates: settings.description_column.join(", "),
            })?;
        Ok(Self {
            description,
            title: find(&settings.title_column),
            company: find(&settings.company_column),
            location: settings
                .location_columns
                .iter()
                .filter_map(|name| find(name))
                .collect(),
            link: find(&settings.link_column),
            skills: find(&settings.skills_column),
        })
    }

    /// Builds a posting from one record.
    fn posting(&self, record: &StringRecord) -> Posting {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let location: Vec<&str> = self
            .location
            .iter()
            .filter_map(|&i| record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        Posting {
            job_text: field(Some(self.description)).unwrap_or_default(),
            title: field(self.title),
            company: field(self.company),
            location: (!location.is_empty()).then(|| location.join(", ")),
            link: field(self.link),
            skills: field(self.skills),
        }
    }
}

/// Loads the postings CSV at `path`.
pub fn load_corpus(path: &Path, settings: &DatasetSettings) -> Result<Corpus, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_corpus(file, settings, path)
}

/// Reads postings from CSV data; `path` is used only in errors and logs.
pub fn read_corpus<R: Read>(
    reader: R,
    settings: &DatasetSettings,
    path: &Path,
) -> Result<Corpus, DatasetError> {
    let csv_error = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = Columns::resolve(&headers, settings, path)?;

    let mut rows = 0_usize;
    let mut postings = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows += 1;
        postings.push(columns.posting(&record));
    }

    let corpus = Corpus::new(postings);
    let dropped = rows - corpus.len();
    if dropped > 0 {
        warn!(
            path = %path.display(),
            dropped,
            "skipped postings without a description"
        );
    }
    debug!(path = %path.display(), rows, postings = corpus.len(), "loaded dataset");
    Ok(corpus)
}

/// Export columns, in [`ExportRow`] field order.
const EXPORT_HEADER: [&str; 8] = [
    "rank",
    "title",
    "company",
    "location",
    "link",
    "skills",
    "matched_skills",
    "score",
];

/// One exported row.
#[derive(Serialize)]
struct ExportRow<'a> {
    /// 1-based rank.
    rank: usize,
    /// Job title.
    title: &'a str,
    /// Company name.
    company: &'a str,
    /// Location.
    location: &'a str,
    /// Link.
    link: &'a str,
    /// The posting's own skills field.
    skills: &'a str,
    /// Skills shared with the résumé, `; ` separated.
    matched_skills: String,
    /// Similarity percentage.
    score: f64,
}

impl<'a> From<&'a SimilarityResult<'a>> for ExportRow<'a> {
    fn from(result: &'a SimilarityResult<'a>) -> Self {
        let posting = result.posting;
        Self {
            rank: result.rank,
            title: posting.title.as_deref().unwrap_or_default(),
            company: posting.company.as_deref().unwrap_or_default(),
            location: posting.location.as_deref().unwrap_or_default(),
            link: posting.link.as_deref().unwrap_or_default(),
            skills: posting.skills.as_deref().unwrap_or_default(),
            matched_skills: result.matched_skills.join("; "),
            score: result.percent(),
        }
    }
}

/// Writes ranked results to a CSV file, replacing it if present.
pub fn export_results(path: &Path, results: &[SimilarityResult<'_>]) -> Result<(), DatasetError> {
    let write_error = |source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = Writer::from_path(path).map_err(write_error)?;
    if results.is_empty() {
        writer
            .write_record(EXPORT_HEADER)
            .map_err(write_error)?;
    }
    for result in results {
        writer
            .serialize(ExportRow::from(result))
            .map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|e| write_error(e.into()))?;
    debug!(path = %path.display(), rows = results.len(), "exported results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use jm_match::rank;

    use super::*;

    /// Dataset using the default column names.
    const JOBS: &str = "\
job_title,company_name,company_address_locality,company_address_region,company_website,skills,job_text
Backend Developer,Initech,Austin,TX,https://initech.example,\"Python, Go\",python developer backend
Architect,Globex,,,https://globex.example,Java,java enterprise architect
Data Scientist,Acme,Berlin,,,\"Python, ML\",python data scientist ml
Ghost,Nobody,,,,,
";

    /// Parses `csv` with `settings`.
    fn read(csv: &str, settings: &DatasetSettings) -> Result<Corpus, DatasetError> {
        read_corpus(csv.as_bytes(), settings, Path::new("jobs.csv"))
    }

    #[test]
    fn reads_default_columns() {
        let corpus = read(JOBS, &DatasetSettings::default()).unwrap();

        assert_eq!(corpus.len(), 3);
        let first = &corpus[0];
        assert_eq!(first.job_text, "python developer backend");
        assert_eq!(first.title.as_deref(), Some("Backend Developer"));
        assert_eq!(first.company.as_deref(), Some("Initech"));
        assert_eq!(first.location.as_deref(), Some("Austin, TX"));
        assert_eq!(first.skills.as_deref(), Some("Python, Go"));
        assert_eq!(corpus[1].location, None);
        assert_eq!(corpus[2].location.as_deref(), Some("Berlin"));
        assert_eq!(corpus[2].link, None);
    }

    #[test]
    fn description_candidates_are_tried_in_order() {
        let settings = DatasetSettings {
            description_column: vec!["description".into(), "body".into()],
            ..DatasetSettings::default()
        };
        let corpus = read("title,body\nCook,kitchen work\n", &settings).unwrap();
        assert_eq!(corpus[0].job_text, "kitchen work");
        assert_eq!(corpus[0].title, None);
    }

    #[test]
    fn missing_description_column_is_an_error() {
        let err = read("title,summary\nCook,kitchen\n", &DatasetSettings::default()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { .. }));
        assert!(err.to_string().contains("job_text"));
    }

    #[test]
    fn header_only_dataset_is_empty() {
        let corpus = read("job_title,job_text\n", &DatasetSettings::default()).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn short_rows_are_tolerated() {
        let corpus = read("job_text,job_title\nrust systems\n", &DatasetSettings::default())
            .unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].title, None);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_corpus(&dir.path().join("nope.csv"), &DatasetSettings::default())
            .unwrap_err();
        assert!(matches!(err, DatasetError::Open { .. }));
    }

    #[test]
    fn export_writes_ranked_rows() {
        let corpus = read(JOBS, &DatasetSettings::default()).unwrap();
        let mut results = rank(&[0.16, 0.0, 0.53], &corpus, 2);
        results[0].matched_skills = vec!["Python".into(), "ML".into()];

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("matches.csv");
        export_results(&out, &results).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines[0],
            "rank,title,company,location,link,skills,matched_skills,score"
        );
        assert_eq!(
            lines[1],
            "1,Data Scientist,Acme,Berlin,,\"Python, ML\",Python; ML,53.0"
        );
        assert_eq!(
            lines[2],
            "2,Backend Developer,Initech,\"Austin, TX\",https://initech.example,\"Python, Go\",,16.0"
        );
    }

    #[test]
    fn export_of_nothing_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.csv");
        export_results(&out, &[]).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap().trim(),
            EXPORT_HEADER.join(",")
        );
    }
}
