use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::error;

fn main() -> gtk::glib::ExitCode {
    let _ = dca_viz::telemetry::init_default_tracing();

    let app = gtk::Application::builder()
        .application_id("rs.dca_viz.desktop")
        .build();
    app.connect_activate(|app| match dca_viz::platform_gtk::build_visualization_window(app) {
        Ok(window) => window.present(),
        Err(err) => {
            error!(error = %err, "failed to build visualization window");
            app.quit();
        }
    });
    app.run()
}
