use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::core::{DCA_STEPS, DataPoint, SampleCurvePoint, SampleGrid, Step, sample_curves};
use crate::error::VizResult;
use crate::interaction::{
    ControlAvailability, NavigationAction, TickOutcome, Transition, VisualizationState,
};

use super::{
    ANIMATION_TICK_INTERVAL, ChartSurface, ManualTickScheduler, NavigationSurface, Readouts,
    SeriesId, TaskId, TickScheduler,
};

struct AnimationTask<H> {
    id: TaskId,
    handle: H,
}

/// Drives the DC walkthrough: owns the iteration state and the step table,
/// and projects every state change onto a chart and a navigation surface.
pub struct VisualizationController<C, N, S: TickScheduler> {
    state: VisualizationState,
    steps: &'static [Step],
    grid: SampleGrid,
    chart: C,
    navigation: N,
    scheduler: S,
    animation: Option<AnimationTask<S::Handle>>,
    next_task_id: u64,
}

impl<C, N, S> VisualizationController<C, N, S>
where
    C: ChartSurface,
    N: NavigationSurface,
    S: TickScheduler,
{
    /// Creates the controller in `Idle(0)` and performs the first render.
    pub fn new(chart: C, navigation: N, scheduler: S) -> VizResult<Self> {
        let mut controller = Self {
            state: VisualizationState::default(),
            steps: &DCA_STEPS,
            grid: SampleGrid::chart_default(),
            chart,
            navigation,
            scheduler,
            animation: None,
            next_task_id: 0,
        };
        controller.render()?;
        Ok(controller)
    }

    #[must_use]
    pub fn state(&self) -> VisualizationState {
        self.state
    }

    #[must_use]
    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    #[must_use]
    pub fn current_step(&self) -> &Step {
        &self.steps[self.state.current_step_index()]
    }

    #[must_use]
    pub fn readouts(&self) -> Readouts {
        Readouts::for_step(self.state.current_step_index(), self.current_step())
    }

    #[must_use]
    pub fn controls(&self) -> ControlAvailability {
        self.state.controls()
    }

    /// Live automatic-advance task, if any.
    #[must_use]
    pub fn active_task(&self) -> Option<TaskId> {
        self.animation.as_ref().map(|task| task.id)
    }

    #[must_use]
    pub fn has_pending_tick(&self) -> bool {
        self.animation.is_some()
    }

    /// Curves for the current step, evaluated lazily.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = SampleCurvePoint> + use<C, N, S> {
        sample_curves(self.grid, self.current_step().point)
    }

    #[must_use]
    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut C {
        &mut self.chart
    }

    #[must_use]
    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Routes a user action; disabled actions are rejected without side effects.
    pub fn dispatch(&mut self, action: NavigationAction) -> VizResult<Transition> {
        match action {
            NavigationAction::Previous => self.go_previous(),
            NavigationAction::Next => self.go_next(),
            NavigationAction::Animate => self.start_animation(),
            NavigationAction::Reset => self.reset(),
        }
    }

    pub fn go_previous(&mut self) -> VizResult<Transition> {
        let transition = self.state.go_previous();
        self.finish_transition(NavigationAction::Previous, transition)
    }

    pub fn go_next(&mut self) -> VizResult<Transition> {
        let transition = self.state.go_next();
        self.finish_transition(NavigationAction::Next, transition)
    }

    /// Restarts at the first step and schedules the repeating advance.
    pub fn start_animation(&mut self) -> VizResult<Transition> {
        let transition = self.state.start_animation();
        if transition.is_applied() {
            self.cancel_animation();
            let id = TaskId(self.next_task_id);
            self.next_task_id += 1;
            let handle = self
                .scheduler
                .schedule_repeating(id, ANIMATION_TICK_INTERVAL);
            self.animation = Some(AnimationTask { id, handle });
            info!(task = %id, interval_ms = ANIMATION_TICK_INTERVAL.as_millis(), "animation started");
        }
        self.finish_transition(NavigationAction::Animate, transition)
    }

    /// Cancels any pending advance and returns to `Idle(0)`; always accepted.
    pub fn reset(&mut self) -> VizResult<Transition> {
        self.cancel_animation();
        let transition = self.state.reset();
        self.finish_transition(NavigationAction::Reset, transition)
    }

    /// Handles one automatic-advance tick delivered for `task`.
    ///
    /// Ticks from a task other than the live one are ignored.
    pub fn on_tick(&mut self, task: TaskId) -> VizResult<TickOutcome> {
        if self.active_task() != Some(task) {
            trace!(task = %task, "ignoring stale tick");
            return Ok(TickOutcome::Ignored);
        }

        let outcome = self.state.advance_tick();
        match outcome {
            TickOutcome::Advanced => {
                debug!(step = self.state.current_step_index(), "animation advanced");
            }
            TickOutcome::Finished => {
                self.cancel_animation();
                info!(step = self.state.current_step_index(), "animation finished");
            }
            TickOutcome::Ignored => {
                self.cancel_animation();
                return Ok(outcome);
            }
        }
        self.render()?;
        Ok(outcome)
    }

    fn finish_transition(
        &mut self,
        action: NavigationAction,
        transition: Transition,
    ) -> VizResult<Transition> {
        match transition {
            Transition::Applied => {
                debug!(
                    ?action,
                    step = self.state.current_step_index(),
                    animating = self.state.is_animating(),
                    "transition applied"
                );
                self.render()?;
            }
            Transition::Rejected => {
                debug!(?action, state = ?self.state, "transition rejected");
            }
        }
        Ok(transition)
    }

    fn cancel_animation(&mut self) {
        if let Some(task) = self.animation.take() {
            self.scheduler.cancel(task.handle);
            debug!(task = %task.id, "animation tick cancelled");
        }
    }

    /// Resamples at the current step, writes readouts and action enablement,
    /// then pushes all series and redraws.
    fn render(&mut self) -> VizResult<()> {
        let samples = self.samples();
        let count = samples.len();
        let mut original = Vec::with_capacity(count);
        let mut concave = Vec::with_capacity(count);
        let mut linear = Vec::with_capacity(count);
        let mut surrogate = Vec::with_capacity(count);
        for sample in samples {
            original.push(DataPoint::new(sample.x, sample.original));
            concave.push(DataPoint::new(sample.x, sample.concave_component));
            linear.push(DataPoint::new(sample.x, sample.linear_approx));
            surrogate.push(DataPoint::new(sample.x, sample.convex_surrogate));
        }

        // Navigation first: it must match the state even if the chart push fails.
        self.readouts().apply_to(&mut self.navigation);
        self.state.controls().apply_to(&mut self.navigation);

        self.push_series(original, concave, linear, surrogate)
            .inspect_err(|err| {
                warn!(
                    step = self.state.current_step_index(),
                    error = %err,
                    "chart update failed"
                );
            })?;
        trace!(
            step = self.state.current_step_index(),
            samples = count,
            "render cycle complete"
        );
        Ok(())
    }

    fn push_series(
        &mut self,
        original: Vec<DataPoint>,
        concave: Vec<DataPoint>,
        linear: Vec<DataPoint>,
        surrogate: Vec<DataPoint>,
    ) -> VizResult<()> {
        self.chart.replace_series(SeriesId::Original, original)?;
        self.chart
            .replace_series(SeriesId::ConcaveComponent, concave)?;
        self.chart.replace_series(SeriesId::LinearApprox, linear)?;
        self.chart
            .replace_series(SeriesId::ConvexSurrogate, surrogate)?;
        self.chart.redraw()
    }
}

impl<C, N> VisualizationController<C, N, ManualTickScheduler>
where
    C: ChartSurface,
    N: NavigationSurface,
{
    /// Moves the virtual clock forward by `by`, delivering every tick that
    /// falls due in order.
    pub fn advance_clock(&mut self, by: Duration) -> VizResult<Vec<TickOutcome>> {
        let deadline = self.scheduler.now() + by;
        let mut outcomes = Vec::new();
        while let Some(task) = self.scheduler.next_due(deadline) {
            outcomes.push(self.on_tick(task)?);
        }
        self.scheduler.settle(deadline);
        Ok(outcomes)
    }
}

impl<C, N, S: TickScheduler> Drop for VisualizationController<C, N, S> {
    fn drop(&mut self) {
        if let Some(task) = self.animation.take() {
            self.scheduler.cancel(task.handle);
        }
    }
}
