use std::time::Duration;

use dca_viz::api::{
    ANIMATION_TICK_INTERVAL, ChartSurface, DisplaySlot, HeadlessNavigation, NavigationSurface,
    SeriesId, TaskId, TickScheduler, VisualizationController,
};
use dca_viz::core::DataPoint;
use dca_viz::interaction::{NavigationAction, TickOutcome};
use dca_viz::{VizError, VizResult};

/// Chart double that records what the controller pushes.
#[derive(Default)]
struct RecordingChart {
    replaced: Vec<(SeriesId, usize)>,
    redraws: usize,
}

impl ChartSurface for RecordingChart {
    fn replace_series(&mut self, id: SeriesId, points: Vec<DataPoint>) -> VizResult<()> {
        self.replaced.push((id, points.len()));
        Ok(())
    }

    fn redraw(&mut self) -> VizResult<()> {
        self.redraws += 1;
        Ok(())
    }
}

/// Scheduler double that only records schedule/cancel calls.
#[derive(Default)]
struct RecordingScheduler {
    scheduled: Vec<(TaskId, Duration)>,
    cancelled: Vec<TaskId>,
}

impl TickScheduler for RecordingScheduler {
    type Handle = TaskId;

    fn schedule_repeating(&mut self, task: TaskId, interval: Duration) -> Self::Handle {
        self.scheduled.push((task, interval));
        task
    }

    fn cancel(&mut self, handle: Self::Handle) {
        self.cancelled.push(handle);
    }
}

struct FailingChart;

impl ChartSurface for FailingChart {
    fn replace_series(&mut self, _id: SeriesId, _points: Vec<DataPoint>) -> VizResult<()> {
        Ok(())
    }

    fn redraw(&mut self) -> VizResult<()> {
        Err(VizError::Backend("surface lost".to_owned()))
    }
}

#[test]
fn controller_works_against_custom_surfaces() {
    let mut controller = VisualizationController::new(
        RecordingChart::default(),
        HeadlessNavigation::default(),
        RecordingScheduler::default(),
    )
    .expect("controller init");

    let chart = controller.chart();
    assert_eq!(chart.redraws, 1);
    let ids: Vec<SeriesId> = chart.replaced.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, SeriesId::ALL.to_vec());
    assert!(chart.replaced.iter().all(|(_, count)| *count == 81));

    controller
        .dispatch(NavigationAction::Animate)
        .expect("animate");
    let task = controller.active_task().expect("live task");
    assert_eq!(
        controller.scheduler().scheduled,
        vec![(task, ANIMATION_TICK_INTERVAL)]
    );
    controller.on_tick(task).expect("tick");
    assert_eq!(controller.state().current_step_index(), 1);

    controller.dispatch(NavigationAction::Reset).expect("reset");
    assert_eq!(controller.scheduler().cancelled, vec![task]);
    assert_eq!(controller.on_tick(task).expect("stale tick"), TickOutcome::Ignored);
    assert_eq!(controller.chart().redraws, 4);
}

#[test]
fn render_failures_surface_as_errors() {
    let result = VisualizationController::new(
        FailingChart,
        HeadlessNavigation::default(),
        RecordingScheduler::default(),
    );
    assert!(matches!(result, Err(VizError::Backend(_))));
}

#[test]
fn headless_navigation_tracks_writes() {
    let mut navigation = HeadlessNavigation::default();
    assert_eq!(navigation.text(DisplaySlot::StepTitle), None);
    assert!(!navigation.is_enabled(NavigationAction::Reset));

    navigation.set_text(DisplaySlot::StepTitle, "Step 3");
    navigation.set_action_enabled(NavigationAction::Reset, true);
    assert_eq!(navigation.text(DisplaySlot::StepTitle), Some("Step 3"));
    assert!(navigation.is_enabled(NavigationAction::Reset));
    // Only text writes are counted.
    assert_eq!(navigation.writes(), 1);

    navigation.set_text(DisplaySlot::Subgradient, "∂h(x) = 0");
    assert_eq!(navigation.writes(), 2);
}
