//! Nearest-centroid classifier

use super::{check_width, validate_classes, validate_matrix, Estimator};
use crate::features::FeatureVector;
use phishguard_core::Result;
use serde::{Deserialize, Serialize};

/// Assigns the class whose centroid is closest in Euclidean distance.
///
/// Offers neither probabilities nor a margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestCentroid {
    pub classes: Vec<String>,
    pub centroids: Vec<Vec<f64>>,
}

impl NearestCentroid {
    pub fn validated(self) -> std::result::Result<Self, String> {
        validate_classes(&self.classes)?;
        validate_matrix("centroids", &self.centroids, self.classes.len())?;
        Ok(self)
    }
}

impl Estimator for NearestCentroid {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.centroids.first().map(Vec::len).unwrap_or(0)
    }

    fn kind(&self) -> &'static str {
        "nearest_centroid"
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize> {
        check_width(self, features)?;
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, centroid) in self.centroids.iter().enumerate() {
            let distance = features.squared_distance(centroid);
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        Ok(best)
    }
}
