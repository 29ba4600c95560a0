//! Story plans as handed over by the planning application.

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::timing::TimingSpec;

/// Parse a JSON array of plans.
pub fn parse_plans(json: &str) -> TimelineResult<Vec<Plan>> {
    serde_json::from_str(json).map_err(|e| TimelineError::Serialization(e.to_string()))
}

/// A top-level arc.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub events: Vec<PlanEvent>,
    #[serde(default)]
    pub sub_arcs: Vec<SubArc>,
}

/// A nested arc. Sub-arcs don't nest further.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubArc {
    pub title: String,
    #[serde(default)]
    pub events: Vec<PlanEvent>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEvent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingSpec>,
    /// Repeats every year, see `yearly_perennial` and `yearly_duration`.
    #[serde(default)]
    pub yearly: bool,
    /// Repeats for as long as the timeline has years.
    #[serde(default)]
    pub yearly_perennial: bool,
    /// Number of years a non-perennial yearly event covers, counting its first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_duration: Option<u32>,
}

impl Plan {
    /// Every event in the plan paired with the arc path it belongs to.
    pub fn events_with_arcs(&self) -> impl Iterator<Item = (String, &PlanEvent)> {
        let direct = self.events.iter().map(move |e| (self.title.clone(), e));
        let nested = self.sub_arcs.iter().flat_map(move |arc| {
            let path = format!("{}{}{}", self.title, crate::collect::ARC_PATH_SEPARATOR, arc.title);
            arc.events.iter().map(move |e| (path.clone(), e))
        });
        direct.chain(nested)
    }
}
