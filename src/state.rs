use serde::{Deserialize, Serialize};

use crate::data::error::DataError;
use crate::data::model::Datasets;
use crate::ui::figure::Figure;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Event wiring
// ---------------------------------------------------------------------------

/// Id of the page region the selection handler writes to.
pub const HURRICANE_CONTAINER: &str = "hurricane_container";

/// Property that carries a button's click counter.
pub const CLICKS_PROPERTY: &str = "n_clicks";

/// The two controls that can drive the hurricane region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    HurricaneCount,
    CycloneEnergy,
}

impl TriggerSource {
    pub const ALL: [TriggerSource; 2] =
        [TriggerSource::HurricaneCount, TriggerSource::CycloneEnergy];

    /// Element id of the button.
    pub fn control_id(self) -> &'static str {
        match self {
            TriggerSource::HurricaneCount => "hur_num",
            TriggerSource::CycloneEnergy => "hur_energy",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            TriggerSource::HurricaneCount => "Number of Hurricanes",
            TriggerSource::CycloneEnergy => "Cyclone Energy",
        }
    }

    /// Resolve a changed property id such as `hur_num.n_clicks`.
    pub fn from_prop_id(prop_id: &str) -> Option<Self> {
        let (id, property) = prop_id.split_once('.')?;
        if property != CLICKS_PROPERTY {
            return None;
        }
        Self::ALL.into_iter().find(|source| source.control_id() == id)
    }

    /// First recognised source among the reported changed property ids.
    pub fn from_changed<S: AsRef<str>>(changed: &[S]) -> Option<Self> {
        changed.iter().find_map(|p| Self::from_prop_id(p.as_ref()))
    }
}

/// Input events wired to each output region.
pub const WIRING: &[(&str, &[TriggerSource])] = &[(HURRICANE_CONTAINER, &TriggerSource::ALL)];

/// Inputs wired to `output`, or `None` for an unknown region.
pub fn wired_inputs(output: &str) -> Option<&'static [TriggerSource]> {
    WIRING
        .iter()
        .find(|(region, _)| *region == output)
        .map(|(_, inputs)| *inputs)
}

// ---------------------------------------------------------------------------
// Callback request
// ---------------------------------------------------------------------------

/// One reported input property, e.g. `{"id": "hur_num", "property": "n_clicks", "value": 2}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallbackInput {
    pub id: String,
    pub property: String,
    #[serde(default)]
    pub value: Option<u64>,
}

/// Body the page posts whenever the callback fires.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackRequest {
    #[serde(default)]
    pub inputs: Vec<CallbackInput>,
    /// Inputs as of the previous acknowledged call.
    #[serde(default)]
    pub previous_inputs: Vec<CallbackInput>,
    /// Property ids that changed, e.g. `["hur_num.n_clicks"]`; `["."]` on page load.
    #[serde(default)]
    pub changed_prop_ids: Vec<String>,
}

impl CallbackRequest {
    /// The reported changed ids win; otherwise fall back to comparing counters.
    pub fn trigger(&self) -> Option<TriggerSource> {
        TriggerSource::from_changed(&self.changed_prop_ids).or_else(|| {
            ClickCounters::from_inputs(&self.inputs)
                .changed_since(&ClickCounters::from_inputs(&self.previous_inputs))
        })
    }

    pub fn counters(&self) -> ClickCounters {
        ClickCounters::from_inputs(&self.inputs)
    }
}

// ---------------------------------------------------------------------------
// Click counters
// ---------------------------------------------------------------------------

/// Click counts of both buttons; each starts at 0 and only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickCounters {
    pub count: u64,
    pub energy: u64,
}

impl ClickCounters {
    /// Collect click counters from reported inputs; unknown ids are ignored.
    pub fn from_inputs(inputs: &[CallbackInput]) -> Self {
        let mut counters = ClickCounters::default();
        for input in inputs.iter().filter(|i| i.property == CLICKS_PROPERTY) {
            let value = input.value.unwrap_or(0);
            match TriggerSource::ALL.into_iter().find(|s| s.control_id() == input.id) {
                Some(TriggerSource::HurricaneCount) => counters.count = value,
                Some(TriggerSource::CycloneEnergy) => counters.energy = value,
                None => {}
            }
        }
        counters
    }

    pub fn get(&self, source: TriggerSource) -> u64 {
        match source {
            TriggerSource::HurricaneCount => self.count,
            TriggerSource::CycloneEnergy => self.energy,
        }
    }

    /// The source whose counter grew since `previous`, if any.
    pub fn changed_since(&self, previous: &ClickCounters) -> Option<TriggerSource> {
        TriggerSource::ALL
            .into_iter()
            .find(|&source| self.get(source) > previous.get(source))
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// What the hurricane region currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    NoSelection,
    ShowingCount,
    ShowingEnergy,
}

impl From<Option<TriggerSource>> for Selection {
    fn from(trigger: Option<TriggerSource>) -> Self {
        match trigger {
            Some(TriggerSource::HurricaneCount) => Selection::ShowingCount,
            Some(TriggerSource::CycloneEnergy) => Selection::ShowingEnergy,
            None => Selection::NoSelection,
        }
    }
}

/// What the handler emits into the hurricane region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionOutput {
    pub output: &'static str,
    pub state: Selection,
    /// `None` renders an empty region.
    pub figure: Option<Figure>,
}

/// Build the hurricane region's content for the given trigger.
pub fn display_hurricane_data(
    trigger: Option<TriggerSource>,
    datasets: &Datasets,
) -> Result<SelectionOutput, DataError> {
    let state = Selection::from(trigger);
    let figure = match state {
        Selection::NoSelection => None,
        Selection::ShowingCount => Some(plot::hurricane_count(&datasets.hurricane_count)?),
        Selection::ShowingEnergy => Some(plot::cyclone_energy(&datasets.cyclone_energy)?),
    };
    Ok(SelectionOutput {
        output: HURRICANE_CONTAINER,
        state,
        figure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Table};
    use crate::data::schema;
    use crate::ui::figure::Trace;

    fn datasets() -> Datasets {
        Datasets {
            hurricane_count: Table::from_rows(
                "hur_data.csv",
                vec![
                    schema::YEAR.into(),
                    schema::HURRICANES_ADJUSTED.into(),
                    schema::HURRICANES_UNADJUSTED.into(),
                ],
                vec![
                    vec![CellValue::Integer(1878), CellValue::Float(9.6), CellValue::Integer(12)],
                    vec![CellValue::Integer(1879), CellValue::Float(6.1), CellValue::Integer(8)],
                ],
            ),
            cyclone_energy: Table::from_rows(
                "cyclone_energy.csv",
                vec![schema::YEAR.into(), schema::ACE.into()],
                vec![
                    vec![CellValue::Integer(1950), CellValue::Integer(243)],
                    vec![CellValue::Integer(1951), CellValue::Integer(137)],
                ],
            ),
            ..Default::default()
        }
    }

    fn series(figure: &Figure) -> Vec<(Option<String>, Vec<CellValue>)> {
        figure
            .data
            .iter()
            .map(|trace| match trace {
                Trace::Scatter(s) => (s.name.clone(), s.y.clone()),
                other => panic!("unexpected trace {other:?}"),
            })
            .collect()
    }

    #[test]
    fn prop_ids_resolve_to_sources() {
        assert_eq!(
            TriggerSource::from_prop_id("hur_num.n_clicks"),
            Some(TriggerSource::HurricaneCount)
        );
        assert_eq!(
            TriggerSource::from_prop_id("hur_energy.n_clicks"),
            Some(TriggerSource::CycloneEnergy)
        );
        assert_eq!(TriggerSource::from_prop_id("."), None);
        assert_eq!(TriggerSource::from_prop_id("hur_num.style"), None);
        assert_eq!(
            TriggerSource::from_changed(&["bogus.n_clicks", "hur_energy.n_clicks"]),
            Some(TriggerSource::CycloneEnergy)
        );
    }

    #[test]
    fn counters_identify_the_button_that_fired() {
        let idle = ClickCounters::default();
        assert_eq!(idle.changed_since(&idle), None);

        let count = ClickCounters { count: 1, energy: 0 };
        assert_eq!(count.changed_since(&idle), Some(TriggerSource::HurricaneCount));

        let energy = ClickCounters { count: 1, energy: 1 };
        assert_eq!(energy.changed_since(&count), Some(TriggerSource::CycloneEnergy));
    }

    fn input(id: &str, value: u64) -> CallbackInput {
        CallbackInput {
            id: id.to_string(),
            property: CLICKS_PROPERTY.to_string(),
            value: Some(value),
        }
    }

    #[test]
    fn request_trigger_prefers_changed_ids() {
        let request: CallbackRequest = serde_json::from_str(
            r#"{
                "inputs": [
                    {"id": "hur_num", "property": "n_clicks", "value": 3},
                    {"id": "hur_energy", "property": "n_clicks", "value": 1}
                ],
                "changedPropIds": ["hur_energy.n_clicks"]
            }"#,
        )
        .unwrap();
        assert_eq!(request.trigger(), Some(TriggerSource::CycloneEnergy));
        assert_eq!(request.counters(), ClickCounters { count: 3, energy: 1 });
    }

    #[test]
    fn request_trigger_falls_back_to_counter_diff() {
        let request = CallbackRequest {
            inputs: vec![input("hur_num", 2), input("hur_energy", 0)],
            previous_inputs: vec![input("hur_num", 1), input("hur_energy", 0)],
            changed_prop_ids: vec![".".to_string()],
        };
        assert_eq!(request.trigger(), Some(TriggerSource::HurricaneCount));
    }

    #[test]
    fn page_load_request_has_no_trigger() {
        let inputs = vec![input("hur_num", 0), input("hur_energy", 0)];
        let request = CallbackRequest {
            inputs: inputs.clone(),
            previous_inputs: inputs,
            changed_prop_ids: vec![".".to_string()],
        };
        assert_eq!(request.trigger(), None);
    }

    #[test]
    fn only_the_hurricane_region_is_wired() {
        assert_eq!(wired_inputs(HURRICANE_CONTAINER), Some(&TriggerSource::ALL[..]));
        assert_eq!(wired_inputs("sea_levels_graph"), None);
    }

    #[test]
    fn no_trigger_renders_nothing() {
        let idle = ClickCounters::default();
        let out = display_hurricane_data(idle.changed_since(&idle), &datasets()).unwrap();
        assert_eq!(out.state, Selection::NoSelection);
        assert_eq!(out.figure, None);
        assert_eq!(out.output, HURRICANE_CONTAINER);
    }

    #[test]
    fn count_trigger_renders_adjusted_then_unadjusted() {
        let ds = datasets();
        let out = display_hurricane_data(Some(TriggerSource::HurricaneCount), &ds).unwrap();
        assert_eq!(out.state, Selection::ShowingCount);

        let figure = out.figure.unwrap();
        assert_eq!(figure.layout.showlegend, Some(false));
        assert_eq!(
            series(&figure),
            vec![
                (
                    Some("Adjusted for Technology Limitations".to_string()),
                    ds.hurricane_count.column(schema::HURRICANES_ADJUSTED).unwrap().to_vec()
                ),
                (
                    Some("Unadjusted".to_string()),
                    ds.hurricane_count.column(schema::HURRICANES_UNADJUSTED).unwrap().to_vec()
                ),
            ]
        );
    }

    #[test]
    fn energy_trigger_renders_the_ace_series() {
        let ds = datasets();
        let before = ClickCounters { count: 1, energy: 0 };
        let after = ClickCounters { count: 1, energy: 1 };
        let out = display_hurricane_data(after.changed_since(&before), &ds).unwrap();
        assert_eq!(out.state, Selection::ShowingEnergy);

        let figure = out.figure.unwrap();
        assert_eq!(
            series(&figure),
            vec![(None, ds.cyclone_energy.column(schema::ACE).unwrap().to_vec())]
        );
    }

    #[test]
    fn same_trigger_renders_the_same_output() {
        let ds = datasets();
        let first = display_hurricane_data(Some(TriggerSource::HurricaneCount), &ds).unwrap();
        let second = display_hurricane_data(Some(TriggerSource::HurricaneCount), &ds).unwrap();
        assert_eq!(first, second);
    }
}
