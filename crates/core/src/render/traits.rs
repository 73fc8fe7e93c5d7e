use chrono::NaiveDateTime;

use crate::errors::CoreError;
use crate::models::chart::ChartSpec;

/// Called on pointer movement with the cursor's position on the time axis.
/// Returns the tooltip text, or `None` to show nothing.
///
/// Runs synchronously inside the renderer's event handling: in-memory
/// lookups only.
pub type HoverHandler = Box<dyn Fn(NaiveDateTime) -> Option<String> + Send>;

/// Narrow boundary to whatever draws the chart.
pub trait ChartRenderer {
    /// Draw the price line with its title, axis labels and legend.
    fn plot_series(&mut self, chart: &ChartSpec) -> Result<(), CoreError>;

    /// Install the hover handler, replacing any previous one.
    fn register_hover_handler(&mut self, handler: HoverHandler);

    /// Flush the rendering surface.
    fn show(&mut self) -> Result<(), CoreError>;
}
