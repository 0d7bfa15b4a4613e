use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Point – one normalized row of the sheet
// ---------------------------------------------------------------------------

/// A single map entity (one row of the source sheet after coercion).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// Classification label, e.g. `Oyuncu` (player) or `Hedef` (target).
    pub category: String,
    /// Display identifier. Not guaranteed to be unique.
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(category: impl Into<String>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Point {
            category: category.into(),
            name: name.into(),
            x,
            y,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete normalized point set
// ---------------------------------------------------------------------------

/// Ordered sequence of points. Every point has finite `x` and `y`; the loader
/// drops rows that fail coercion before a `Dataset` is built from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub points: Vec<Point>,
}

impl Dataset {
    pub fn from_points(points: Vec<Point>) -> Self {
        Dataset { points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Sorted set of distinct categories (drives the category multi-select).
    pub fn categories(&self) -> BTreeSet<String> {
        self.points.iter().map(|p| p.category.clone()).collect()
    }

    /// Sorted, de-duplicated point names (drives the distance selectors).
    pub fn unique_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.points.iter().map(|p| p.name.as_str()).collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// First point carrying `name`, with its position in the dataset.
    pub fn find_by_name(&self, name: &str) -> Option<(usize, &Point)> {
        self.points.iter().enumerate().find(|(_, p)| p.name == name)
    }
}

impl FromIterator<Point> for Dataset {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Dataset::from_points(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_points(vec![
            Point::new("Oyuncu", "B", 3.0, 4.0),
            Point::new("Hedef", "C", -5.0, -5.0),
            Point::new("Oyuncu", "A", 0.0, 0.0),
            Point::new("Oyuncu", "A", 9.0, 9.0),
        ])
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        let cats: Vec<String> = sample().categories().into_iter().collect();
        assert_eq!(cats, vec!["Hedef".to_string(), "Oyuncu".to_string()]);
    }

    #[test]
    fn unique_names_are_sorted() {
        assert_eq!(sample().unique_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let ds = sample();
        let (idx, p) = ds.find_by_name("A").unwrap();
        assert_eq!(idx, 2);
        assert_eq!((p.x, p.y), (0.0, 0.0));
        assert!(ds.find_by_name("missing").is_none());
    }
}
