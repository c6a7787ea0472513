use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name given to plans whose raw entry has no usable `name`
pub const UNNAMED_PLAN: &str = "Unnamed";

/// Call-to-action link rendered on a plan card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanAction {
    pub name: String,
    pub url: String,
}

/// A normalized pricing plan.
///
/// Identity is by `name`. Names are expected to be unique within one load,
/// but lookups by name always use the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub name: String,

    pub monthly_price: Option<f64>,

    pub yearly_price: Option<f64>,

    /// Name of the plan whose features this plan extends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,

    pub description: String,

    /// Ordered, duplicate-free feature names.
    /// After inheritance resolution: inherited features first, then own.
    pub features: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<PlanAction>,
}

impl PlanRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            monthly_price: None,
            yearly_price: None,
            inherits: None,
            description: String::new(),
            features: Vec::new(),
            action: None,
        }
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn inheriting(mut self, base: impl Into<String>) -> Self {
        self.inherits = Some(base.into());
        self
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Feature name -> human readable description, in the order the source listed them.
///
/// Serializes as a JSON object, the same shape the payload uses. Only the
/// comparison table reads this; inheritance resolution never does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureDictionary {
    entries: IndexMap<String, String>,
}

impl FeatureDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a feature, keeping the position of an existing entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.entries.insert(name.into(), description.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// `(name, description)` pairs in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, description)| (name.as_str(), description.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, D> FromIterator<(N, D)> for FeatureDictionary
where
    N: Into<String>,
    D: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, D)>>(iter: T) -> Self {
        let mut dict = FeatureDictionary::new();
        for (name, description) in iter {
            dict.insert(name, description);
        }
        dict
    }
}

/// Output of one successful load: resolved plans plus comparison metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanCatalog {
    pub plans: Vec<PlanRecord>,

    pub features: FeatureDictionary,

    /// `default_plan` named by the payload itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_plan: Option<String>,
}

impl PlanCatalog {
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// First plan with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.plans.iter().position(|p| p.name == name)
    }
}
