//! GTK4 front-end: labels and buttons for the navigation surface, a drawing
//! area for the chart, and a glib timer for the automatic advance.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use indexmap::IndexMap;
use tracing::warn;

use crate::api::{
    ChartConfig, ChartSurface, DisplaySlot, LineChart, NavigationSurface, SeriesId, TaskId,
    TickScheduler, VisualizationController,
};
use crate::core::{DataPoint, Viewport};
use crate::error::{VizError, VizResult};
use crate::interaction::NavigationAction;
use crate::render::CairoRenderer;

const DEFAULT_CHART_WIDTH: u32 = 900;
const DEFAULT_CHART_HEIGHT: u32 = 520;

pub type GtkVisualizationController =
    VisualizationController<GtkChartSurface, GtkNavigationSurface, GlibTickScheduler>;

/// Labels for the five readouts and buttons for the four actions.
pub struct GtkNavigationSurface {
    labels: IndexMap<DisplaySlot, gtk::Label>,
    buttons: IndexMap<NavigationAction, gtk::Button>,
}

impl GtkNavigationSurface {
    #[must_use]
    pub fn new() -> Self {
        let labels = DisplaySlot::ALL
            .into_iter()
            .map(|slot| {
                let label = gtk::Label::new(None);
                label.set_xalign(0.0);
                label.set_wrap(true);
                (slot, label)
            })
            .collect();
        let buttons = NavigationAction::ALL
            .into_iter()
            .map(|action| (action, gtk::Button::with_label(action_caption(action))))
            .collect();
        Self { labels, buttons }
    }

    #[must_use]
    pub fn label(&self, slot: DisplaySlot) -> Option<&gtk::Label> {
        self.labels.get(&slot)
    }

    #[must_use]
    pub fn button(&self, action: NavigationAction) -> Option<&gtk::Button> {
        self.buttons.get(&action)
    }
}

impl Default for GtkNavigationSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationSurface for GtkNavigationSurface {
    fn set_text(&mut self, slot: DisplaySlot, text: &str) {
        if let Some(label) = self.labels.get(&slot) {
            label.set_text(text);
        }
    }

    fn set_action_enabled(&mut self, action: NavigationAction, enabled: bool) {
        if let Some(button) = self.buttons.get(&action) {
            button.set_sensitive(enabled);
        }
    }
}

fn action_caption(action: NavigationAction) -> &'static str {
    match action {
        NavigationAction::Previous => "← Previous",
        NavigationAction::Next => "Next →",
        NavigationAction::Animate => "▶ Animate",
        NavigationAction::Reset => "↺ Reset",
    }
}

/// Chart surface drawing into a `DrawingArea` through the cairo backend.
///
/// Series buffers live in the shared chart; `redraw` only queues a draw, and
/// the draw callback lays out for the widget's current size.
pub struct GtkChartSurface {
    chart: Rc<RefCell<LineChart<CairoRenderer>>>,
    drawing_area: gtk::DrawingArea,
}

impl GtkChartSurface {
    pub fn new(config: ChartConfig) -> VizResult<Self> {
        let viewport = Viewport::new(DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT);
        // Draws go through the widget's context; the offscreen surface stays unused.
        let renderer = CairoRenderer::new(1, 1)?;
        let chart = Rc::new(RefCell::new(LineChart::new(renderer, config, viewport)?));

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));

        {
            let chart = Rc::clone(&chart);
            drawing_area.set_draw_func(move |_area, context, width, height| {
                let Ok(mut chart) = chart.try_borrow_mut() else {
                    warn!("skipping chart draw while chart is borrowed");
                    return;
                };
                let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height))
                else {
                    return;
                };
                let result = chart
                    .set_viewport(Viewport::new(width, height))
                    .and_then(|()| chart.render_on_cairo_context(context));
                if let Err(err) = result {
                    warn!(error = %err, "chart draw failed");
                }
            });
        }

        Ok(Self {
            chart,
            drawing_area,
        })
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn chart(&self) -> Rc<RefCell<LineChart<CairoRenderer>>> {
        Rc::clone(&self.chart)
    }
}

impl ChartSurface for GtkChartSurface {
    fn replace_series(&mut self, id: SeriesId, points: Vec<DataPoint>) -> VizResult<()> {
        let mut chart = self
            .chart
            .try_borrow_mut()
            .map_err(|_| VizError::Backend("chart is busy drawing".to_owned()))?;
        chart.replace_series(id, points)
    }

    fn redraw(&mut self) -> VizResult<()> {
        self.drawing_area.queue_draw();
        Ok(())
    }
}

type TickHook = Rc<RefCell<Option<Box<dyn Fn(TaskId)>>>>;

/// Tick scheduler backed by `glib::timeout_add_local`.
///
/// Cancellation flips a shared flag: the source stops itself on its next
/// dispatch and never forwards a tick once cancelled.
#[derive(Clone, Default)]
pub struct GlibTickScheduler {
    hook: TickHook,
}

/// Cancellation token for one glib timer.
#[derive(Debug)]
pub struct GlibTickHandle {
    alive: Rc<Cell<bool>>,
}

impl GlibTickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the callback that receives every live tick.
    pub fn set_tick_hook(&self, hook: impl Fn(TaskId) + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(hook));
    }
}

impl TickScheduler for GlibTickScheduler {
    type Handle = GlibTickHandle;

    fn schedule_repeating(&mut self, task: TaskId, interval: Duration) -> GlibTickHandle {
        let alive = Rc::new(Cell::new(true));
        let flag = Rc::clone(&alive);
        let hook = Rc::clone(&self.hook);
        let _source_id = glib::timeout_add_local(interval, move || {
            if !flag.get() {
                return glib::ControlFlow::Break;
            }
            if let Some(hook) = hook.borrow().as_ref() {
                hook(task);
            }
            if flag.get() {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });
        GlibTickHandle { alive }
    }

    fn cancel(&mut self, handle: GlibTickHandle) {
        handle.alive.set(false);
    }
}

/// Builds the visualization window and wires controls, timer and chart.
pub fn build_visualization_window(app: &gtk::Application) -> VizResult<gtk::ApplicationWindow> {
    let chart = GtkChartSurface::new(ChartConfig::dca_default())?;
    let drawing_area = chart.drawing_area().clone();
    let navigation = GtkNavigationSurface::new();

    let readout_box = gtk::Box::new(gtk::Orientation::Vertical, 4);
    for slot in DisplaySlot::ALL {
        if let Some(label) = navigation.label(slot) {
            readout_box.append(label);
        }
    }
    let controls = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    let buttons: Vec<(NavigationAction, gtk::Button)> = NavigationAction::ALL
        .into_iter()
        .filter_map(|action| navigation.button(action).map(|b| (action, b.clone())))
        .collect();
    for (_, button) in &buttons {
        controls.append(button);
    }

    let scheduler = GlibTickScheduler::new();
    let controller: Rc<RefCell<GtkVisualizationController>> = Rc::new(RefCell::new(
        VisualizationController::new(chart, navigation, scheduler.clone())?,
    ));

    {
        let controller = Rc::downgrade(&controller);
        scheduler.set_tick_hook(move |task| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            let Ok(mut controller) = controller.try_borrow_mut() else {
                warn!(task = %task, "dropping tick while controller is busy");
                return;
            };
            if let Err(err) = controller.on_tick(task) {
                warn!(error = %err, "animation tick failed");
            }
        });
    }

    for (action, button) in buttons {
        let controller = Rc::clone(&controller);
        button.connect_clicked(move |_| {
            let Ok(mut controller) = controller.try_borrow_mut() else {
                warn!(?action, "dropping click while controller is busy");
                return;
            };
            if let Err(err) = controller.dispatch(action) {
                warn!(?action, error = %err, "navigation action failed");
            }
        });
    }

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(12);
    root.set_margin_bottom(12);
    root.set_margin_start(12);
    root.set_margin_end(12);
    root.append(&drawing_area);
    root.append(&readout_box);
    root.append(&controls);

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("DC Algorithm Visualization")
        .default_width(960)
        .default_height(760)
        .child(&root)
        .build();

    // Button closures keep the controller alive; closing only stops the timer.
    window.connect_close_request(move |_| {
        if let Ok(mut controller) = controller.try_borrow_mut() {
            if let Err(err) = controller.reset() {
                warn!(error = %err, "reset on close failed");
            }
        }
        glib::Propagation::Proceed
    });

    Ok(window)
}
