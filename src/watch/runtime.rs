// src/watch/runtime.rs

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::config::{ensure_acyclic, parse_plan, PlanFile, PlanFormat};
use crate::errors::Result;
use crate::report;
use crate::session::{PlanSession, PlanView};
use crate::types::{OutputFormat, ScheduleStrategy};

/// Events consumed by the watch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    PlanChanged,
    ShutdownRequested,
}

#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    pub format: OutputFormat,
    pub show_hidden: bool,
    pub strict: bool,
    /// Overrides `[config].strategy` of every loaded snapshot.
    pub strategy: Option<ScheduleStrategy>,
}

/// Async shell around [`PlanSession`]: reads the plan on every change event,
/// re-plans, and writes the rendered view to `out`.
///
/// A plan that fails to parse or validate is reported and skipped; the loop
/// keeps running so the next save can fix it.
pub struct WatchRuntime<W: Write> {
    plan_path: PathBuf,
    options: WatchOptions,
    session: PlanSession,
    gate: super::ContentGate,
    event_rx: mpsc::Receiver<WatchEvent>,
    out: W,
}

impl<W: Write> WatchRuntime<W> {
    pub fn new(
        plan_path: impl Into<PathBuf>,
        options: WatchOptions,
        event_rx: mpsc::Receiver<WatchEvent>,
        out: W,
    ) -> Self {
        Self {
            plan_path: plan_path.into(),
            options,
            session: PlanSession::new(Default::default(), false),
            gate: super::ContentGate::new(),
            event_rx,
            out,
        }
    }

    /// Main loop. Renders once up front, then once per effective change.
    /// Returns the output sink when the event channel closes or shutdown is
    /// requested.
    pub async fn run(mut self) -> Result<W> {
        info!("critpath watch runtime started");
        self.refresh_and_print();

        while let Some(event) = self.event_rx.recv().await {
            debug!(?event, "watch runtime received event");
            match event {
                WatchEvent::PlanChanged => self.refresh_and_print(),
                WatchEvent::ShutdownRequested => {
                    info!("shutdown requested; stopping watch runtime");
                    break;
                }
            }
        }

        Ok(self.out)
    }

    fn refresh_and_print(&mut self) {
        match self.refresh() {
            Ok(Some(view)) => {
                if let Err(err) = self.print(&view) {
                    error!("failed to write plan: {err}");
                }
            }
            Ok(None) => {}
            Err(err) => {
                // Retry the same bytes on the next event; the failure may
                // have been a half-written save.
                self.gate.clear();
                error!("plan not updated: {err}");
            }
        }
    }

    /// Load the plan if its contents changed and run it through the session.
    pub fn refresh(&mut self) -> Result<Option<PlanView>> {
        let bytes = fs::read(&self.plan_path)?;
        if !self.gate.admit(&bytes) {
            return Ok(None);
        }

        let contents = String::from_utf8_lossy(&bytes);
        let raw = parse_plan(&contents, PlanFormat::from_path(&self.plan_path))?;
        let mut plan = PlanFile::try_from(raw)?;
        if let Some(strategy) = self.options.strategy {
            plan.set_strategy(strategy);
        }
        if self.options.strict {
            ensure_acyclic(plan.tasks())?;
        }

        self.session.reconfigure(plan.config());
        Ok(Some(self.session.apply_plan(&plan)))
    }

    fn print(&mut self, view: &PlanView) -> Result<()> {
        let rendered = report::render(view, self.options.format, self.options.show_hidden)?;
        writeln!(self.out, "{rendered}")?;
        self.out.flush()?;
        Ok(())
    }
}
