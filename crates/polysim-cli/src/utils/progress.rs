use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use polysim::engine::progress::{Progress, ProgressCallback};
use std::time::Duration;

const SPINNER_TICK: Duration = Duration::from_millis(80);
const FRAME_BAR_TEMPLATE: &str =
    "{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} frames ({elapsed_precise}, eta {eta})";

/// Renders simulation progress on stderr: a spinner per phase, and a frame bar
/// while the integrator is stepping.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        bar.finish_and_clear();
        Self { bar }
    }

    /// A callback for `ProgressReporter`; the handler and its callbacks share
    /// one bar.
    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let handler = self.clone();
        Box::new(move |event| handler.handle(event))
    }

    fn handle(&self, event: Progress) {
        let bar = &self.bar;
        match event {
            Progress::PhaseStart { name } => {
                bar.reset();
                bar.set_length(0);
                bar.set_style(spinner_style());
                bar.set_message(name);
                bar.enable_steady_tick(SPINNER_TICK);
            }
            Progress::StepsStart { total_steps } => {
                bar.disable_steady_tick();
                bar.reset();
                bar.set_style(frame_bar_style());
                bar.set_length(total_steps);
            }
            Progress::StepFinished { step, time } => {
                bar.set_position(step);
                bar.set_message(format!("t = {time:.3}"));
            }
            Progress::StepsFinish => {
                if let Some(total) = bar.length() {
                    bar.set_position(total);
                }
                bar.finish();
            }
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                bar.finish_with_message("✓ Done");
            }
        }
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn frame_bar_style() -> ProgressStyle {
    ProgressStyle::with_template(FRAME_BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}
