// Named gesture library
// Keeps example gestures per entry name and recognizes new gestures against them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::GestureResult;
use crate::gesture::Gesture;
use crate::learner::{Instance, InstanceLearner, Orientation, Prediction, SequenceType};

/// Settings that decide how gestures are turned into feature vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Single-stroke sequence matching or whole-gesture spatial matching
    pub sequence_type: SequenceType,

    /// Rotational alignment for sequence matching
    pub orientation: Orientation,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            sequence_type: SequenceType::Sensitive,
            orientation: Orientation::Sensitive,
        }
    }
}

/// In-memory collection of labeled example gestures
///
/// Every stored gesture has a matching training sample in the learner.
/// Settings apply to gestures added or recognized after they change;
/// samples already in the learner keep the vectors they were built with.
#[derive(Debug, Clone, Default)]
pub struct GestureStore {
    settings: StoreSettings,
    named_gestures: BTreeMap<String, Vec<Gesture>>,
    learner: InstanceLearner,
    changed: bool,
}

impl GestureStore {
    pub fn new() -> Self {
        Self::with_settings(StoreSettings::default())
    }

    pub fn with_settings(settings: StoreSettings) -> Self {
        GestureStore {
            settings,
            named_gestures: BTreeMap::new(),
            learner: InstanceLearner::new(),
            changed: false,
        }
    }

    pub fn settings(&self) -> StoreSettings {
        self.settings
    }

    pub fn set_sequence_type(&mut self, sequence_type: SequenceType) {
        self.settings.sequence_type = sequence_type;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.settings.orientation = orientation;
    }

    /// Entry names in alphabetical order
    pub fn entries(&self) -> Vec<&str> {
        self.named_gestures.keys().map(String::as_str).collect()
    }

    /// Example gestures stored under `entry`
    pub fn gestures(&self, entry: &str) -> Option<&[Gesture]> {
        self.named_gestures.get(entry).map(Vec::as_slice)
    }

    pub fn learner(&self) -> &InstanceLearner {
        &self.learner
    }

    /// Whether the store was modified since it was created
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Add an example gesture under `entry`
    ///
    /// Empty entry names are ignored.
    pub fn add_gesture(&mut self, entry: &str, gesture: Gesture) -> GestureResult<()> {
        if entry.is_empty() {
            log::debug!("Ignoring gesture {} with an empty entry name", gesture.id());
            return Ok(());
        }

        let instance = Instance::from_gesture(
            self.settings.sequence_type,
            self.settings.orientation,
            &gesture,
            Some(entry.to_string()),
        )?;
        self.learner.add_instance(instance)?;

        self.named_gestures
            .entry(entry.to_string())
            .or_default()
            .push(gesture);
        self.changed = true;

        log::debug!("Added gesture to entry '{}'", entry);
        Ok(())
    }

    /// Remove one example gesture from `entry`
    ///
    /// The entry itself is dropped once its last gesture is gone. Only
    /// samples trained under `entry` are touched, one per removed gesture.
    /// Returns false when the entry holds no gesture with that id.
    pub fn remove_gesture(&mut self, entry: &str, gesture_id: u64) -> bool {
        let gestures = match self.named_gestures.get_mut(entry) {
            Some(gestures) => gestures,
            None => return false,
        };

        let before = gestures.len();
        gestures.retain(|g| g.id() != gesture_id);
        let removed = before - gestures.len();
        if removed == 0 {
            return false;
        }
        if gestures.is_empty() {
            self.named_gestures.remove(entry);
        }

        for _ in 0..removed {
            self.learner.remove_sample(gesture_id, entry);
        }
        self.changed = true;
        true
    }

    /// Remove an entry together with all of its gestures
    pub fn remove_entry(&mut self, entry: &str) {
        self.named_gestures.remove(entry);
        self.learner.remove_instances(entry);
        self.changed = true;
    }

    /// Rank stored entries by similarity to `gesture`
    pub fn recognize(&self, gesture: &Gesture) -> GestureResult<Vec<Prediction>> {
        let query = Instance::from_gesture(
            self.settings.sequence_type,
            self.settings.orientation,
            gesture,
            None,
        )?;

        Ok(self.learner.classify(
            self.settings.sequence_type,
            self.settings.orientation,
            query.vector(),
        ))
    }
}
