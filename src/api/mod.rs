//! Chart surface, presentation contracts and the visualization controller.

mod axis_ticks;
mod chart_config;
mod controller;
mod line_chart;
mod line_chart_frame_builder;
mod presentation;
mod scheduler;
mod snapshot;

pub use chart_config::{
    AxisConfig, AxisPosition, CHART_CONFIG_JSON_SCHEMA_V1, ChartConfig, ChartConfigJsonContractV1,
    ChartKind, LegendConfig, LegendPosition, MAX_SERIES, SeriesConfig, SeriesId,
};
pub use controller::VisualizationController;
pub use line_chart::{ChartSurface, LineChart};
pub use presentation::{DisplaySlot, HeadlessNavigation, NavigationSurface, Readouts};
pub use scheduler::{
    ANIMATION_TICK_INTERVAL, ManualTickHandle, ManualTickScheduler, TaskId, TickScheduler,
};
pub use snapshot::{
    VISUALIZATION_SNAPSHOT_JSON_SCHEMA_V1, VisualizationSnapshot,
    VisualizationSnapshotJsonContractV1,
};
