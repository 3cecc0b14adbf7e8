//! Descriptive statistics over the fonts of a `TargetImage` tree.

use std::{fmt, io, path::Path};

use crate::fs::sorted_entries;

/// Per-font file counts of a `TargetImage` tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    /// The number of entries in each font directory, in font name order.
    counts: Vec<usize>,
}

impl DatasetSummary {
    /// Creates a [`DatasetSummary`] from the number of characters in each font.
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// Returns the number of fonts.
    pub fn font_count(&self) -> usize {
        self.counts.len()
    }

    /// Returns the smallest number of characters in a font.
    pub fn min(&self) -> Option<usize> {
        self.counts.iter().copied().min()
    }

    /// Returns the largest number of characters in a font.
    pub fn max(&self) -> Option<usize> {
        self.counts.iter().copied().max()
    }

    /// Returns the total number of characters across all fonts.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Returns the mean number of characters per font.
    pub fn mean(&self) -> Option<f64> {
        if self.counts.is_empty() {
            return None;
        }

        Some(self.total() as f64 / self.counts.len() as f64)
    }

    /// Returns the sample standard deviation of the number of characters per font.
    ///
    /// A single font has a standard deviation of zero.
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        if self.counts.len() < 2 {
            return Some(0.0);
        }

        let squares = self
            .counts
            .iter()
            .map(|&count| (count as f64 - mean).powi(2))
            .sum::<f64>();
        Some((squares / (self.counts.len() - 1) as f64).sqrt())
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(min), Some(max), Some(mean), Some(std_dev)) =
            (self.min(), self.max(), self.mean(), self.std_dev())
        else {
            return write!(f, "No fonts found in the dataset.");
        };

        writeln!(f, "Total number of fonts: {}", self.font_count())?;
        writeln!(f, "Range of characters per font: {min}-{max}")?;
        writeln!(f, "Average number of characters per font: {mean:.2}")?;
        writeln!(f, "Standard deviation of characters per font: {std_dev:.2}")?;
        write!(f, "Total number of characters: {}", self.total())
    }
}

/// Counts the entries of every font directory in `target_dir`.
///
/// # Errors
///
/// Returns an [`io::Error`] if `target_dir` or one of its font directories cannot be read.
pub fn summarize(target_dir: &Path) -> io::Result<DatasetSummary> {
    let mut counts = Vec::new();

    for entry in sorted_entries(target_dir)? {
        if !entry.file_type()?.is_dir() {
            continue;
        }

        counts.push(std::fs::read_dir(entry.path())?.count());
    }

    Ok(DatasetSummary::from_counts(counts))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn empty_dataset() {
        let root = tempfile::tempdir().unwrap();

        let summary = summarize(root.path()).unwrap();
        assert_eq!(summary.font_count(), 0);
        assert_eq!(summary.to_string(), "No fonts found in the dataset.");
    }

    #[test]
    fn two_empty_fonts() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("font1")).unwrap();
        fs::create_dir_all(root.path().join("font2")).unwrap();

        assert_eq!(
            summarize(root.path()).unwrap().to_string(),
            "Total number of fonts: 2\n\
             Range of characters per font: 0-0\n\
             Average number of characters per font: 0.00\n\
             Standard deviation of characters per font: 0.00\n\
             Total number of characters: 0"
        );
    }

    #[test]
    fn two_to_three_characters() {
        let root = tempfile::tempdir().unwrap();
        let fonts = [
            ("font1", ["書", "法"].as_slice()),
            ("font2", ["書", "法", "劍"].as_slice()),
        ];
        for (font, characters) in fonts {
            let dir = root.path().join(font);
            fs::create_dir_all(&dir).unwrap();
            for character in characters {
                fs::write(dir.join(format!("{font}+{character}.png")), b"").unwrap();
            }
        }

        assert_eq!(
            summarize(root.path()).unwrap().to_string(),
            "Total number of fonts: 2\n\
             Range of characters per font: 2-3\n\
             Average number of characters per font: 2.50\n\
             Standard deviation of characters per font: 0.71\n\
             Total number of characters: 5"
        );
    }

    #[test]
    fn single_font_has_zero_deviation() {
        let summary = DatasetSummary::from_counts(vec![4]);
        assert_eq!(summary.std_dev(), Some(0.0));
        assert_eq!(summary.mean(), Some(4.0));
    }
}
