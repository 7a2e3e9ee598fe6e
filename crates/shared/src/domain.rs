use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Fixed scan order used by reorder, export and rendering.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn json_key(self) -> &'static str {
        match self {
            Priority::High => "highPriority",
            Priority::Medium => "mediumPriority",
            Priority::Low => "lowPriority",
        }
    }

    pub fn from_json_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.json_key() == key)
    }

    pub fn csv_label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Priority::High => "High Priority",
            Priority::Medium => "Medium Priority",
            Priority::Low => "Low Priority",
        }
    }
}

/// Three ordered buckets of opaque task labels. Labels are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSet {
    #[serde(default)]
    pub high_priority: Vec<String>,
    #[serde(default)]
    pub medium_priority: Vec<String>,
    #[serde(default)]
    pub low_priority: Vec<String>,
}

/// End of a drag gesture: the dragged label and the label it was dropped on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    pub active: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over: Option<String>,
}

impl DragEnd {
    pub fn new(active: impl Into<String>, over: Option<impl Into<String>>) -> Self {
        Self {
            active: active.into(),
            over: over.map(Into::into),
        }
    }
}

impl TaskSet {
    pub fn new(high: Vec<String>, medium: Vec<String>, low: Vec<String>) -> Self {
        Self {
            high_priority: high,
            medium_priority: medium,
            low_priority: low,
        }
    }

    pub fn bucket(&self, priority: Priority) -> &[String] {
        match priority {
            Priority::High => &self.high_priority,
            Priority::Medium => &self.medium_priority,
            Priority::Low => &self.low_priority,
        }
    }

    pub fn bucket_mut(&mut self, priority: Priority) -> &mut Vec<String> {
        match priority {
            Priority::High => &mut self.high_priority,
            Priority::Medium => &mut self.medium_priority,
            Priority::Low => &mut self.low_priority,
        }
    }

    pub fn is_empty(&self) -> bool {
        Priority::ALL.iter().all(|p| self.bucket(*p).is_empty())
    }

    pub fn len(&self) -> usize {
        Priority::ALL.iter().map(|p| self.bucket(*p).len()).sum()
    }

    /// Moves `event.active` to the position of `event.over` inside the first
    /// bucket (high, medium, low) that holds both labels.
    ///
    /// Returns an unchanged copy when there is no drop target, the target is
    /// the dragged label itself, or no single bucket holds both labels.
    /// Duplicate labels resolve to their first occurrence.
    pub fn reorder(&self, event: &DragEnd) -> TaskSet {
        let mut next = self.clone();
        let Some(over) = event.over.as_deref() else {
            return next;
        };
        if over == event.active {
            return next;
        }

        for priority in Priority::ALL {
            let list = next.bucket_mut(priority);
            let from = list.iter().position(|task| *task == event.active);
            let to = list.iter().position(|task| task == over);
            if let (Some(from), Some(to)) = (from, to) {
                move_item(list, from, to);
                break;
            }
        }
        next
    }
}

fn move_item(list: &mut Vec<String>, from: usize, to: usize) {
    let item = list.remove(from);
    list.insert(to, item);
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
