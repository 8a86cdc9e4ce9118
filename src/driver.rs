// THEORY:
// The `driver` module orchestrates pairwise comparison over a collection.
// It owns no analysis of its own: it enumerates files, hands each unordered
// pair (i, j) with i < j to the pipeline exactly once, and streams results
// to the caller's reporter in enumeration order.
//
// Enumeration is deterministic (file names sorted lexicographically) and
// strictly sequential — one comparison finishes, suspension points included,
// before the next begins. A decode failure aborts the run; per-pair
// continuation is a policy decision left to callers who want it.

use crate::error::CompareError;
use crate::pipeline::{ComparePipeline, PairResult};
use log::info;
use std::path::{Path, PathBuf};

/// Sequentially enumerates and compares image pairs.
pub struct PairwiseDriver {
    pipeline: ComparePipeline,
}

impl PairwiseDriver {
    pub fn new(pipeline: ComparePipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &ComparePipeline {
        &self.pipeline
    }

    /// Lists the files of a directory in sorted order. Every entry is
    /// assumed to be a decodable image; the pipeline reports the ones that
    /// are not.
    pub async fn list_images(dir: &Path) -> Result<Vec<PathBuf>, CompareError> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|source| CompareError::Read {
                path: dir.to_path_buf(),
                source,
            })?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| CompareError::Read {
                path: dir.to_path_buf(),
                source,
            })?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| CompareError::Read {
                    path: entry.path(),
                    source,
                })?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// All unordered pairs (i, j) with i < j, in listing order.
    pub fn pairs(files: &[PathBuf]) -> Vec<(PathBuf, PathBuf)> {
        let mut pairs = Vec::with_capacity(files.len() * files.len().saturating_sub(1) / 2);
        for i in 0..files.len() {
            for j in (i + 1)..files.len() {
                pairs.push((files[i].clone(), files[j].clone()));
            }
        }
        pairs
    }

    /// Compares one explicit pair and hands the result to the reporter.
    pub async fn run_pair<F>(
        &self,
        left: &Path,
        right: &Path,
        mut report: F,
    ) -> Result<(), CompareError>
    where
        F: FnMut(&PairResult),
    {
        let result = self.pipeline.compare_files(left, right).await?;
        report(&result);
        Ok(())
    }

    /// Compares every unordered pair of files in `dir`, reporting each
    /// result as soon as it is available.
    pub async fn run_directory<F>(&self, dir: &Path, mut report: F) -> Result<(), CompareError>
    where
        F: FnMut(&PairResult),
    {
        let files = Self::list_images(dir).await?;
        let pairs = Self::pairs(&files);
        info!("{} files in {:?}, {} pairs to compare", files.len(), dir, pairs.len());

        for (left, right) in &pairs {
            let result = self.pipeline.compare_files(left, right).await?;
            report(&result);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_fixtures::*;
    use crate::pipeline::PipelineConfig;

    fn seeded_directory(label: &str) -> PathBuf {
        let dir = scratch_dir(label);
        gradient_image(64)
            .save(dir.join("a.png"))
            .expect("Error saving fixture.");
        gradient_image(64)
            .save(dir.join("b.png"))
            .expect("Error saving fixture.");
        checkerboard_image(64, 8)
            .save(dir.join("c.png"))
            .expect("Error saving fixture.");
        dir
    }

    #[test]
    fn pairs_visit_each_combination_once_in_order() {
        let files: Vec<PathBuf> = ["a", "b", "c"].into_iter().map(PathBuf::from).collect();
        let pairs = PairwiseDriver::pairs(&files);
        let names: Vec<(String, String)> = pairs
            .iter()
            .map(|(l, r)| {
                (
                    l.to_string_lossy().into_owned(),
                    r.to_string_lossy().into_owned(),
                )
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("a".into(), "b".into()),
                ("a".into(), "c".into()),
                ("b".into(), "c".into()),
            ]
        );
    }

    #[tokio::test]
    async fn directory_run_flags_only_the_near_duplicate_pair() {
        let dir = seeded_directory("driver_flags");
        let driver = PairwiseDriver::new(ComparePipeline::new(PipelineConfig::default()));

        let mut results = Vec::new();
        driver
            .run_directory(&dir, |result| results.push(result.clone()))
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        // a-b: identical gradients. a-c and b-c: gradient vs checkerboard.
        assert!(results[0].is_duplicate, "a-b scored {}", results[0].score);
        assert!(!results[1].is_duplicate, "a-c scored {}", results[1].score);
        assert!(!results[2].is_duplicate, "b-c scored {}", results[2].score);
        assert!(results[0].left.ends_with("a.png"));
        assert!(results[0].right.ends_with("b.png"));
    }

    #[tokio::test]
    async fn missing_directory_propagates_a_read_error() {
        let driver = PairwiseDriver::new(ComparePipeline::new(PipelineConfig::default()));
        let outcome = driver
            .run_directory(Path::new("/nonexistent/lookalike_images"), |_| {})
            .await;
        assert!(matches!(outcome, Err(CompareError::Read { .. })));
    }
}
