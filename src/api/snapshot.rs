use serde::{Deserialize, Serialize};

use crate::core::SampleCurvePoint;
use crate::error::{VizError, VizResult};
use crate::interaction::{ControlAvailability, VisualizationState};

use super::{ChartSurface, NavigationSurface, Readouts, TickScheduler, VisualizationController};

pub const VISUALIZATION_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of one rendered step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSnapshot {
    pub state: VisualizationState,
    pub point: f64,
    pub readouts: Readouts,
    pub controls: ControlAvailability,
    pub samples: Vec<SampleCurvePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: VisualizationSnapshot,
}

impl<C, N, S> VisualizationController<C, N, S>
where
    C: ChartSurface,
    N: NavigationSurface,
    S: TickScheduler,
{
    #[must_use]
    pub fn snapshot(&self) -> VisualizationSnapshot {
        VisualizationSnapshot {
            state: self.state(),
            point: self.current_step().point,
            readouts: self.readouts(),
            controls: self.controls(),
            samples: self.samples().collect(),
        }
    }
}

impl VisualizationSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> VizResult<String> {
        let payload = VisualizationSnapshotJsonContractV1 {
            schema_version: VISUALIZATION_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            VizError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> VizResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<VisualizationSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: VisualizationSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                VizError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != VISUALIZATION_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(VizError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
