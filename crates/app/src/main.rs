use std::io::{self, Write};

use pbr_chart_core::errors::CoreError;
use pbr_chart_core::models::settings::Settings;
use pbr_chart_core::render::text::TextChartRenderer;
use pbr_chart_core::ValuationChart;

fn preprocess() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CoreError> {
    preprocess();

    // e.g. "9107.T", "7203.T" (Toyota), "AAPL", "META"
    let settings = Settings::default();
    log::info!("Settings: {settings:?}");

    let chart = ValuationChart::with_yahoo(settings)?;
    let report = chart.build_report().await?;

    let mut renderer = TextChartRenderer::new(io::stdout());
    chart.attach(&report, &mut renderer)?;

    if !report.warnings.is_empty() {
        log::info!("{} fallback(s) taken, see warnings above", report.warnings.len());
    }

    print_prompt()?;
    let shown = renderer.run_interactive(io::stdin().lock())?;
    log::info!("{shown} tooltips shown");
    Ok(())
}

fn print_prompt() -> Result<(), CoreError> {
    let mut out = io::stdout().lock();
    writeln!(out, "\nHover: enter a date (YYYY-MM-DD [HH:MM]) per line, 'q' to quit.")?;
    out.flush()?;
    Ok(())
}
