/// Events emitted by long-running workflows.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    /// One step done; `item` names what was processed.
    TaskIncrement { item: String },
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `body` as a counted task of `total` steps inside a named phase.
    pub fn phase<T>(&self, name: &'static str, total: u64, body: impl FnOnce(&Self) -> T) -> T {
        self.report(Progress::PhaseStart { name });
        self.report(Progress::TaskStart { total_steps: total });
        let result = body(self);
        self.report(Progress::TaskFinish);
        self.report(Progress::PhaseFinish);
        result
    }

    pub fn step(&self, item: impl Into<String>) {
        self.report(Progress::TaskIncrement { item: item.into() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn phase_brackets_steps_with_start_and_finish() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|e: Progress| events.lock().unwrap().push(e)));
        let value = reporter.phase("Reading tables", 2, |r| {
            r.step("Toth");
            r.step("Langmuir");
            7
        });
        assert_eq!(value, 7);
        drop(reporter);
        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], Progress::PhaseStart { name: "Reading tables" });
        assert_eq!(events[1], Progress::TaskStart { total_steps: 2 });
        assert_eq!(events[5], Progress::PhaseFinish);
    }

    #[test]
    fn reporter_without_callback_is_silent() {
        ProgressReporter::new().step("nothing");
    }
}
