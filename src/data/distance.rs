use thiserror::Error;

use super::model::Dataset;

/// Why no distance can be shown. A normal outcome, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("no point named '{0}'")]
    NotFound(String),
    #[error("both selections refer to the same point")]
    SamePoint,
}

/// Euclidean distance between the first points named `a` and `b`.
///
/// Always looked up in the unfiltered dataset, so hidden points can still be
/// measured. Two distinct points at the same coordinates give `0.0`.
pub fn distance(dataset: &Dataset, a: &str, b: &str) -> Result<f64, Unavailable> {
    let (idx_a, pa) = dataset
        .find_by_name(a)
        .ok_or_else(|| Unavailable::NotFound(a.to_string()))?;
    let (idx_b, pb) = dataset
        .find_by_name(b)
        .ok_or_else(|| Unavailable::NotFound(b.to_string()))?;

    if idx_a == idx_b {
        return Err(Unavailable::SamePoint);
    }

    Ok((pa.x - pb.x).hypot(pa.y - pb.y))
}

/// Distance label as shown in the side panel, e.g. `5.00 squares`.
pub fn format_distance(d: f64) -> String {
    format!("{d:.2} squares")
}
