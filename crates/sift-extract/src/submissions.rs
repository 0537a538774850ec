use anyhow::Context;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory under a course folder holding one sub-directory per student.
pub const SUBMISSIONS_DIR: &str = "submissions";

/// File each student directory is expected to contain.
pub const SUBMISSION_FILE: &str = "submission.txt";

/// One student's submission file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub student: String,
    pub path: PathBuf,
}

/// Finds `submissions/<student>/submission.txt` files under a course folder.
pub struct SubmissionScanner<'a> {
    root: &'a Path,
}

impl<'a> SubmissionScanner<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// All submissions, sorted by student name.
    pub fn scan(&self) -> anyhow::Result<Vec<Submission>> {
        let dir = self.root.join(SUBMISSIONS_DIR);
        if !dir.is_dir() {
            anyhow::bail!("No {SUBMISSIONS_DIR}/ directory in {}", self.root.display());
        }

        let walker = WalkBuilder::new(&dir)
            .hidden(true)
            .git_ignore(true)
            .git_exclude(true)
            .max_depth(Some(2))
            .build();

        let mut submissions = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!(%err, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.depth() != 2 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if entry.file_name() != SUBMISSION_FILE {
                continue;
            }

            let student = match entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
            {
                Some(s) => s,
                None => continue,
            };

            submissions.push(Submission {
                student,
                path: entry.path().to_path_buf(),
            });
        }

        // Sort by student for deterministic output
        submissions.sort_by(|a, b| a.student.cmp(&b.student));
        Ok(submissions)
    }
}

/// The model answer file of a course folder: its first top-level `.txt` file by name.
pub fn find_model_file(root: &Path) -> anyhow::Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkBuilder::new(root)
        .max_depth(Some(1))
        .build()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .with_context(|| format!("No model answer .txt file in {}", root.display()))
}
