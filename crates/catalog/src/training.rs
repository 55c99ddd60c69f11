//! The fixed training table.
//!
//! Twenty hand-authored rows, grouped by genre in blocks of four: two movies
//! the user will watch followed by two they won't.

use serde::{Deserialize, Serialize};

use crate::types::{
    AgeRating, Era, FeatureRow, Genre, Length, MovieFeatures, Outcome, UserRating,
};

/// One labelled example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRow {
    /// 1-based position in the table
    pub id: usize,
    pub features: MovieFeatures,
    pub outcome: Outcome,
}

/// The ordered set of labelled examples the model is fit on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingTable {
    rows: Vec<TrainingRow>,
}

impl TrainingTable {
    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrainingRow> {
        self.rows.iter()
    }

    /// Encoded feature rows, one per example, in table order
    pub fn feature_matrix(&self) -> Vec<FeatureRow> {
        self.rows.iter().map(|row| row.features.codes()).collect()
    }

    /// Labels aligned with [`feature_matrix`](Self::feature_matrix)
    pub fn labels(&self) -> Vec<Outcome> {
        self.rows.iter().map(|row| row.outcome).collect()
    }
}

impl<'a> IntoIterator for &'a TrainingTable {
    type Item = &'a TrainingRow;
    type IntoIter = std::slice::Iter<'a, TrainingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Build the fixed 20-row training table.
pub fn training_table() -> TrainingTable {
    use AgeRating::*;
    use Era::*;
    use Outcome::*;
    use UserRating::*;

    let examples = [
        // Action: generally popular
        (Genre::Action, Pg13, Length::Medium, Modern, Good, WillWatch),
        (Genre::Action, Pg13, Length::Long, Latest, Excellent, WillWatch),
        (Genre::Action, R, Length::Medium, Retro, Poor, WontWatch),
        (Genre::Action, Pg, Length::Short, Classic, Average, WontWatch),
        // Comedy: mixed preferences
        (Genre::Comedy, Pg13, Length::Medium, Modern, Good, WillWatch),
        (Genre::Comedy, Pg, Length::Medium, Latest, Excellent, WillWatch),
        (Genre::Comedy, R, Length::Long, Retro, Poor, WontWatch),
        (Genre::Comedy, SixteenVl, Length::VeryLong, Classic, Average, WontWatch),
        // Drama: quality dependent
        (Genre::Drama, SixteenVl, Length::Long, Modern, Excellent, WillWatch),
        (Genre::Drama, EighteenPlus, Length::Long, Retro, Good, WillWatch),
        (Genre::Drama, Pg13, Length::Medium, Latest, Poor, WontWatch),
        (Genre::Drama, Pg, Length::Short, Classic, Average, WontWatch),
        // Romance: moderate appeal
        (Genre::Romance, Pg13, Length::Medium, Modern, Good, WillWatch),
        (Genre::Romance, Pg, Length::Medium, Latest, Excellent, WillWatch),
        (Genre::Romance, EighteenPlus, Length::Long, Retro, Poor, WontWatch),
        (Genre::Romance, SixteenVl, Length::VeryLong, Classic, Average, WontWatch),
        // Horror: rating sensitive
        (Genre::Horror, R, Length::Medium, Modern, Good, WillWatch),
        (Genre::Horror, EighteenPlus, Length::Medium, Latest, Excellent, WillWatch),
        (Genre::Horror, R, Length::Long, Retro, Poor, WontWatch),
        (Genre::Horror, SixteenVl, Length::Medium, Classic, Average, WontWatch),
    ];

    let rows = examples
        .into_iter()
        .enumerate()
        .map(
            |(index, (genre, age_rating, length, era, user_rating, outcome))| TrainingRow {
                id: index + 1,
                features: MovieFeatures::new(genre, age_rating, length, era, user_rating),
                outcome,
            },
        )
        .collect();

    TrainingTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    /// The table as raw codes: five features followed by the label
    const RAW: [[u8; 6]; 20] = [
        [1, 2, 2, 3, 3, 1],
        [1, 2, 3, 4, 4, 1],
        [1, 5, 2, 2, 1, 0],
        [1, 1, 1, 1, 2, 0],
        [2, 2, 2, 3, 3, 1],
        [2, 1, 2, 4, 4, 1],
        [2, 5, 3, 2, 1, 0],
        [2, 3, 4, 1, 2, 0],
        [3, 3, 3, 3, 4, 1],
        [3, 4, 3, 2, 3, 1],
        [3, 2, 2, 4, 1, 0],
        [3, 1, 1, 1, 2, 0],
        [4, 2, 2, 3, 3, 1],
        [4, 1, 2, 4, 4, 1],
        [4, 4, 3, 2, 1, 0],
        [4, 3, 4, 1, 2, 0],
        [5, 5, 2, 3, 3, 1],
        [5, 4, 2, 4, 4, 1],
        [5, 5, 3, 2, 1, 0],
        [5, 3, 2, 1, 2, 0],
    ];

    #[test]
    fn test_table_matches_raw_codes() {
        let table = training_table();
        assert_eq!(table.len(), 20);

        for (row, raw) in table.iter().zip(RAW.iter()) {
            assert_eq!(row.features.codes(), [raw[0], raw[1], raw[2], raw[3], raw[4]]);
            assert_eq!(row.outcome.code(), raw[5]);
        }
    }

    #[test]
    fn test_rows_are_grouped_by_genre() {
        let table = training_table();
        for (block, genre) in Genre::ALL.iter().enumerate() {
            let rows = &table.rows()[block * 4..block * 4 + 4];
            assert!(rows.iter().all(|row| row.features.genre == *genre));

            let labels: Vec<Outcome> = rows.iter().map(|row| row.outcome).collect();
            assert_eq!(
                labels,
                vec![
                    Outcome::WillWatch,
                    Outcome::WillWatch,
                    Outcome::WontWatch,
                    Outcome::WontWatch
                ]
            );
        }
    }

    #[test]
    fn test_ids_are_one_based() {
        let table = training_table();
        let ids: Vec<usize> = table.iter().map(|row| row.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_matrix_and_labels_align() {
        let table = training_table();
        let matrix = table.feature_matrix();
        let labels = table.labels();

        assert_eq!(matrix.len(), labels.len());
        assert_eq!(matrix[0], [1, 2, 2, 3, 3]);
        assert_eq!(labels[0], Outcome::WillWatch);
        assert_eq!(matrix[19], [5, 3, 2, 1, 2]);
        assert_eq!(labels[19], Outcome::WontWatch);
    }
}
