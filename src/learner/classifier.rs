// Instance-based classifier
// Weighted nearest-neighbor matching of a query vector against labeled samples

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{GestureError, GestureResult};
use crate::geometry::{minimum_cosine_distance, squared_euclidean_distance};
use crate::learner::types::{Instance, Orientation, Prediction, SequenceType};

/// Rank labels by how closely their samples match `vector`
///
/// Each sample of the same length as the query contributes a weight of
/// `1 / distance` (or `f64::MAX` for an exact match). A label scores the
/// weight of its nearest sample. The result is sorted by score descending,
/// with equal scores in label order. Samples of a different length and
/// unlabeled instances are skipped.
///
/// A sample whose vector is not finite (a degenerate stroke) scores NaN.
/// NaN compares equal to every score, so such a label keeps its alphabetical
/// slot instead of sinking to the end.
pub fn classify(
    sequence_type: SequenceType,
    orientation: Orientation,
    vector: &[f32],
    instances: &[Instance],
) -> Vec<Prediction> {
    let mut label_to_score: BTreeMap<&str, f64> = BTreeMap::new();

    for sample in instances {
        let label = match sample.label() {
            Some(label) => label,
            None => continue,
        };

        if sample.vector().len() != vector.len() {
            log::trace!(
                "Skipping instance {}: {} features, query has {}",
                sample.id(),
                sample.vector().len(),
                vector.len()
            );
            continue;
        }

        let distance = match sequence_type {
            SequenceType::Sensitive => {
                minimum_cosine_distance(sample.vector(), vector, orientation)
            }
            SequenceType::Invariant => squared_euclidean_distance(sample.vector(), vector),
        };

        let weight = if distance == 0.0 {
            f64::MAX
        } else {
            1.0 / distance
        };

        let best = label_to_score.entry(label).or_insert(weight);
        if weight > *best {
            *best = weight;
        }
    }

    let mut predictions: Vec<Prediction> = label_to_score
        .into_iter()
        .map(|(label, score)| Prediction::new(label.to_string(), score))
        .collect();

    // Stable, so ties keep the alphabetical order of the map
    predictions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    log::debug!(
        "Classified against {} instances: {} candidate labels",
        instances.len(),
        predictions.len()
    );

    predictions
}

/// Nearest-neighbor learner over a growing list of labeled samples
#[derive(Debug, Clone, Default)]
pub struct InstanceLearner {
    instances: Vec<Instance>,
}

impl InstanceLearner {
    pub fn new() -> Self {
        InstanceLearner {
            instances: Vec::new(),
        }
    }

    /// Add a training sample
    /// Queries carry no label and are rejected
    pub fn add_instance(&mut self, instance: Instance) -> GestureResult<()> {
        if instance.is_query() {
            return Err(GestureError::UnlabeledInstance { id: instance.id() });
        }

        self.instances.push(instance);
        Ok(())
    }

    /// Stored samples in insertion order
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Remove the first sample extracted from gesture `id`
    pub fn remove_instance(&mut self, id: u64) {
        if let Some(position) = self.instances.iter().position(|i| i.id() == id) {
            self.instances.remove(position);
        }
    }

    /// Remove the first sample extracted from gesture `id` under `label`
    /// Returns false when no such sample exists
    pub fn remove_sample(&mut self, id: u64, label: &str) -> bool {
        match self
            .instances
            .iter()
            .position(|i| i.id() == id && i.label() == Some(label))
        {
            Some(position) => {
                self.instances.remove(position);
                true
            }
            None => false,
        }
    }

    /// Remove every sample trained under `label`
    pub fn remove_instances(&mut self, label: &str) {
        self.instances.retain(|i| i.label() != Some(label));
    }

    pub fn classify(
        &self,
        sequence_type: SequenceType,
        orientation: Orientation,
        vector: &[f32],
    ) -> Vec<Prediction> {
        classify(sequence_type, orientation, vector, &self.instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64, label: &str, vector: Vec<f32>) -> Instance {
        Instance::new(id, vector, Some(label.to_string()))
    }

    fn unit(points: &[f32]) -> Vec<f32> {
        let magnitude = points.iter().map(|v| v * v).sum::<f32>().sqrt();
        points.iter().map(|v| v / magnitude).collect()
    }

    #[test]
    fn test_exact_match_scores_max() {
        let store = vec![
            sample(1, "circle", vec![1.0, 0.0, 0.0, 1.0]),
            sample(2, "square", vec![0.0, 1.0, 1.0, 0.0]),
        ];

        let predictions = classify(
            SequenceType::Invariant,
            Orientation::Sensitive,
            &[1.0, 0.0, 0.0, 1.0],
            &store,
        );

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].label, "circle");
        assert_eq!(predictions[0].score, f64::MAX);
        assert_eq!(predictions[1].label, "square");
        // Mean squared difference of 1.0 per component
        assert_eq!(predictions[1].score, 1.0);
    }

    #[test]
    fn test_empty_store_yields_nothing() {
        let predictions = classify(SequenceType::Invariant, Orientation::Sensitive, &[1.0, 2.0], &[]);
        assert!(predictions.is_empty());
    }

    #[test]
    fn test_length_mismatch_is_skipped() {
        let store = vec![
            sample(1, "patch-a", vec![0.5; 256]),
            sample(2, "patch-b", vec![0.25; 256]),
        ];

        let predictions = classify(
            SequenceType::Sensitive,
            Orientation::Sensitive,
            &unit(&[1.0; 32]),
            &store,
        );
        assert!(predictions.is_empty());
    }

    #[test]
    fn test_label_scores_nearest_sample() {
        let store = vec![
            sample(1, "wave", vec![4.0, 4.0]),
            sample(2, "wave", vec![1.0, 1.0]),
            sample(3, "wave", vec![3.0, 3.0]),
            sample(4, "line", vec![2.0, 0.0]),
        ];

        let predictions = classify(SequenceType::Invariant, Orientation::Sensitive, &[0.0, 0.0], &store);

        // wave's nearest sample is (1, 1): distance 1.0
        let wave = predictions.iter().find(|p| p.label == "wave").unwrap();
        assert_eq!(wave.score, 1.0);

        // line: distance 2.0
        let line = predictions.iter().find(|p| p.label == "line").unwrap();
        assert_eq!(line.score, 0.5);

        assert_eq!(predictions[0].label, "wave");
    }

    #[test]
    fn test_ties_resolve_alphabetically() {
        let store = vec![
            sample(1, "zeta", vec![1.0, 1.0]),
            sample(2, "alpha", vec![-1.0, -1.0]),
            sample(3, "mid", vec![1.0, -1.0]),
            sample(4, "close", vec![0.5, 0.0]),
        ];

        let predictions = classify(SequenceType::Invariant, Orientation::Sensitive, &[0.0, 0.0], &store);
        let labels: Vec<&str> = predictions.iter().map(|p| p.label.as_str()).collect();

        assert_eq!(labels, vec!["close", "alpha", "mid", "zeta"]);
        for pair in predictions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_queries_in_store_are_ignored() {
        let store = vec![
            Instance::new(1, vec![1.0, 1.0], None),
            sample(2, "dot", vec![2.0, 2.0]),
        ];

        let predictions = classify(SequenceType::Invariant, Orientation::Sensitive, &[1.0, 1.0], &store);

        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].label, "dot");
    }

    #[test]
    fn test_sequence_mode_ranks_identical_first() {
        let arc = unit(&[1.0, 0.0, 0.7, 0.7, 0.0, 1.0, -0.7, 0.7]);
        let zigzag = unit(&[1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
        let store = vec![sample(1, "arc", arc.clone()), sample(2, "zigzag", zigzag)];

        let predictions = classify(SequenceType::Sensitive, Orientation::Sensitive, &arc, &store);

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].label, "arc");
        assert!(predictions[0].score > predictions[1].score);
    }

    #[test]
    fn test_non_finite_sample_keeps_label_order() {
        let store = vec![
            sample(1, "dot", vec![f32::NAN, f32::NAN]),
            sample(2, "zeta", vec![0.5, 0.5]),
        ];

        let predictions = classify(SequenceType::Invariant, Orientation::Sensitive, &[0.0, 0.0], &store);

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].label, "dot");
        assert!(predictions[0].score.is_nan());
        assert_eq!(predictions[1].label, "zeta");
        assert_eq!(predictions[1].score, 4.0);
    }

    #[test]
    fn test_remove_sample_is_scoped_to_label() {
        let mut learner = InstanceLearner::new();
        learner.add_instance(sample(5, "a", vec![1.0])).unwrap();
        learner.add_instance(sample(5, "b", vec![2.0])).unwrap();

        assert!(!learner.remove_sample(5, "c"));
        assert!(learner.remove_sample(5, "b"));
        assert_eq!(learner.len(), 1);
        assert_eq!(learner.instances()[0].label(), Some("a"));
    }

    #[test]
    fn test_learner_rejects_queries() {
        let mut learner = InstanceLearner::new();
        let result = learner.add_instance(Instance::new(9, vec![1.0], None));

        assert_eq!(result, Err(GestureError::UnlabeledInstance { id: 9 }));
        assert!(learner.is_empty());
    }

    #[test]
    fn test_learner_removal() {
        let mut learner = InstanceLearner::new();
        learner.add_instance(sample(1, "a", vec![1.0, 0.0])).unwrap();
        learner.add_instance(sample(2, "a", vec![0.0, 1.0])).unwrap();
        learner.add_instance(sample(3, "b", vec![1.0, 1.0])).unwrap();
        assert_eq!(learner.len(), 3);

        learner.remove_instance(2);
        assert_eq!(learner.len(), 2);
        assert!(learner.instances().iter().all(|i| i.id() != 2));

        learner.remove_instances("a");
        assert_eq!(learner.len(), 1);
        assert_eq!(learner.instances()[0].label(), Some("b"));

        let predictions =
            learner.classify(SequenceType::Invariant, Orientation::Sensitive, &[1.0, 1.0]);
        assert_eq!(predictions[0].label, "b");
        assert_eq!(predictions[0].score, f64::MAX);
    }
}
