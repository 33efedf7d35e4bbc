//! Response anonymization for peer ranking
//!
//! Stage 2 must not let a model know which competitor wrote which answer.
//! Successful Stage-1 responses are relabeled `"Response A"`, `"Response B"`,
//! ... in roster order, and the label-to-model mapping is kept on the
//! engine side only. Nothing sent back to a model ever contains a model
//! identity.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::model::Model;

use super::value_objects::StageOneResult;

/// Opaque label assigned to an anonymized response (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Label for the i-th successful response (0-based)
    ///
    /// Labels run `Response A` through `Response Z`, then continue
    /// `Response AA`, `Response AB`, ... like spreadsheet columns, so
    /// councils larger than 26 still get unique labels.
    pub fn for_index(index: usize) -> Self {
        Self(format!("Response {}", letters_for_index(index)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::new(s)
    }
}

fn letters_for_index(mut index: usize) -> String {
    let mut letters = String::new();
    loop {
        letters.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters
}

/// A successful response with its anonymized label attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledResponse {
    pub label: Label,
    pub content: String,
}

/// Bidirectional label-to-model mapping for one deliberation
///
/// Built once per Stage 2 and immutable afterwards. Serializes as a JSON
/// object `{"Response A": "openai/gpt-5.1", ...}` in label order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnonymizationMap {
    pairs: Vec<(Label, Model)>,
}

impl AnonymizationMap {
    pub fn new(pairs: Vec<(Label, Model)>) -> Self {
        Self { pairs }
    }

    /// The model behind a label
    pub fn model_for(&self, label: &Label) -> Option<&Model> {
        self.pairs.iter().find(|(l, _)| l == label).map(|(_, m)| m)
    }

    /// The label assigned to a model
    pub fn label_for(&self, model: &Model) -> Option<&Label> {
        self.pairs.iter().find(|(_, m)| m == model).map(|(l, _)| l)
    }

    /// All labels in assignment order
    pub fn labels(&self) -> Vec<Label> {
        self.pairs.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn pairs(&self) -> &[(Label, Model)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Serialize for AnonymizationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (label, model) in &self.pairs {
            map.serialize_entry(label.as_str(), model.as_str())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnonymizationMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = AnonymizationMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of labels to model identifiers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, model)) = access.next_entry::<String, String>()? {
                    pairs.push((Label::new(label), Model::from_id(&model)));
                }
                Ok(AnonymizationMap::new(pairs))
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

/// Anonymize the successful responses of a Stage-1 result
///
/// Failed entries get no label and do not appear in the output; labels
/// are assigned in stage-one order so the mapping is deterministic for a
/// given result.
pub fn anonymize(stage_one: &StageOneResult) -> (Vec<LabeledResponse>, AnonymizationMap) {
    let mut labeled = Vec::new();
    let mut pairs = Vec::new();

    for (i, response) in stage_one.successful().enumerate() {
        let label = Label::for_index(i);
        if let Some(content) = &response.content {
            labeled.push(LabeledResponse {
                label: label.clone(),
                content: content.clone(),
            });
            pairs.push((label, response.model.clone()));
        }
    }

    (labeled, AnonymizationMap::new(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::value_objects::ModelResponse;

    fn stage_one() -> StageOneResult {
        StageOneResult::new(vec![
            ModelResponse::success(Model::Gpt51, "Answer from GPT"),
            ModelResponse::failure(Model::Gemini3Pro, "timeout"),
            ModelResponse::success(Model::ClaudeSonnet45, "Answer from Claude"),
        ])
    }

    #[test]
    fn test_labels_follow_alphabet() {
        assert_eq!(Label::for_index(0).as_str(), "Response A");
        assert_eq!(Label::for_index(1).as_str(), "Response B");
        assert_eq!(Label::for_index(25).as_str(), "Response Z");
        assert_eq!(Label::for_index(26).as_str(), "Response AA");
        assert_eq!(Label::for_index(27).as_str(), "Response AB");
        assert_eq!(Label::for_index(51).as_str(), "Response AZ");
        assert_eq!(Label::for_index(52).as_str(), "Response BA");
    }

    #[test]
    fn test_anonymize_skips_failures() {
        let (labeled, map) = anonymize(&stage_one());
        assert_eq!(labeled.len(), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(labeled[0].label.as_str(), "Response A");
        assert_eq!(labeled[0].content, "Answer from GPT");
        assert_eq!(labeled[1].label.as_str(), "Response B");
        assert!(map.label_for(&Model::Gemini3Pro).is_none());
    }

    #[test]
    fn test_map_round_trips_both_directions() {
        let (_, map) = anonymize(&stage_one());
        let label = map.label_for(&Model::ClaudeSonnet45).unwrap().clone();
        assert_eq!(map.model_for(&label), Some(&Model::ClaudeSonnet45));
        let model = map.model_for(&Label::new("Response A")).unwrap().clone();
        assert_eq!(map.label_for(&model), Some(&Label::new("Response A")));
    }

    #[test]
    fn test_labels_are_injective() {
        let responses: Vec<_> = (0..30)
            .map(|i| ModelResponse::success(Model::Custom(format!("test/model-{i}")), "hi"))
            .collect();
        let (labeled, map) = anonymize(&StageOneResult::new(responses));
        assert_eq!(labeled.len(), 30);
        let mut labels: Vec<_> = labeled.iter().map(|l| l.label.clone()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 30, "labels must be unique");
        assert_eq!(map.len(), 30);
    }

    #[test]
    fn test_no_model_identity_in_labeled_content() {
        let (labeled, _) = anonymize(&stage_one());
        for response in &labeled {
            assert!(!response.label.as_str().contains("gpt"));
            assert!(!response.label.as_str().contains("claude"));
        }
    }

    #[test]
    fn test_map_serializes_as_object() {
        let (_, map) = anonymize(&stage_one());
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"Response A":"openai/gpt-5.1","Response B":"anthropic/claude-sonnet-4.5"}"#
        );
        let back: AnonymizationMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
