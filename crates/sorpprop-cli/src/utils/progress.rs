use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use sorpproplib::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders core progress events on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = Arc::clone(&self.pb);

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(name);
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.finish_with_message("✓ Done");
                }
                Progress::TaskStart { total_steps } => {
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total_steps);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                }
                Progress::TaskIncrement { item } => {
                    pb.set_message(item);
                    pb.inc(1);
                }
                Progress::TaskFinish => {
                    let length = pb.length().unwrap_or(0);
                    if pb.position() < length {
                        pb.set_position(length);
                    }
                    pb.finish();
                }
                Progress::Message(msg) => {
                    if pb.is_finished() {
                        pb.set_message(msg);
                    } else {
                        pb.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
