//! Drain state machine behind a [`QueuedLabel`](super::QueuedLabel).

use super::command::Command;
use super::label::Shared;
use crate::choreography::Choreography;
use crate::core::{
    EngineStatus, PendingQueue, Timing, TransitionHistory, TransitionRecord, TransitionStyle,
};
use crate::host::{Color, Completion, Font, RenderHost, Surface, SurfaceId, TimerHandle};
use chrono::{DateTime, Utc};
use std::rc::Weak;

/// Initial configuration of an engine.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LabelSettings {
    pub style: TransitionStyle,
    pub timing: Timing,
    pub color: Option<Color>,
    pub font: Option<Font>,
    pub history_limit: usize,
    /// Text already on screen; skips the immediate first value.
    pub displayed: Option<String>,
    /// Records carried over from a checkpoint.
    pub history: Option<TransitionHistory>,
}

impl LabelSettings {
    pub(crate) fn for_style(style: TransitionStyle) -> Self {
        Self {
            style,
            timing: Timing::for_style(style),
            color: None,
            font: None,
            history_limit: crate::core::DEFAULT_HISTORY_LIMIT,
            displayed: None,
            history: None,
        }
    }
}

struct InFlight {
    id: u64,
    plan: Choreography,
    next_phase: usize,
    started_at: DateTime<Utc>,
    // Every phase has run; waiting for earlier transitions to retire.
    done: bool,
}

#[derive(Clone, Copy)]
struct ArmedTimer {
    handle: TimerHandle,
    generation: u64,
}

/// Engine state. Only the inbox pump in `label.rs` mutates it.
pub(crate) struct Engine<H: RenderHost + 'static> {
    host: H,
    this: Weak<Shared<H>>,
    style: TransitionStyle,
    timing: Timing,
    queue: PendingQueue,
    displayed: String,
    // Set once anything has been shown; the first value skips the queue.
    primed: bool,
    // Queue-front entries whose transition has started, in start order.
    in_flight: Vec<InFlight>,
    timer: Option<ArmedTimer>,
    generation: u64,
    next_transition: u64,
    history: TransitionHistory,
    color: Option<Color>,
    font: Option<Font>,
}

impl<H: RenderHost + 'static> Engine<H> {
    pub(crate) fn new(mut host: H, this: Weak<Shared<H>>, settings: LabelSettings) -> Self {
        for id in [SurfaceId::Primary, SurfaceId::Ghost] {
            let surface = host.surface_mut(id);
            if let Some(color) = settings.color {
                surface.set_color(color);
            }
            if let Some(font) = &settings.font {
                surface.set_font(font);
            }
        }
        host.surface_mut(SurfaceId::Ghost).set_hidden(true);
        if let Some(text) = &settings.displayed {
            host.surface_mut(SurfaceId::Primary).set_text(text);
        }
        let history = settings
            .history
            .unwrap_or_else(|| TransitionHistory::with_limit(settings.history_limit));

        Self {
            host,
            this,
            style: settings.style,
            timing: settings.timing,
            queue: PendingQueue::new(),
            primed: settings.displayed.is_some(),
            displayed: settings.displayed.unwrap_or_default(),
            in_flight: Vec::new(),
            timer: None,
            generation: 0,
            next_transition: 0,
            history,
            color: settings.color,
            font: settings.font,
        }
    }

    pub(crate) fn handle(&mut self, command: Command) {
        tracing::trace!(command = command.name(), "handling command");
        match command {
            Command::SetText(value) => self.set_text(value),
            Command::SetStyle(style) => {
                tracing::debug!(%style, "style changed");
                self.style = style;
                self.timing = Timing::for_style(style);
            }
            Command::SetDuration(duration) => self.timing.set_duration(duration),
            Command::SetInterval(interval) => self.timing.set_interval(interval),
            Command::SetZoomScale(scale) => self.timing.set_zoom_scale(scale),
            Command::SetColor(color) => {
                self.color = Some(color);
                self.each_surface(|s| s.set_color(color));
            }
            Command::SetFont(font) => {
                self.each_surface(|s| s.set_font(&font));
                self.font = Some(font);
            }
            Command::PhaseComplete { transition } => self.advance_phase(transition),
            Command::Tick { generation } => self.tick(generation),
        }
    }

    /// Queue `value`, starting it at once when no timer is armed.
    ///
    /// Only arms the timer if something is left afterwards, so `None`-style
    /// values, which finish synchronously, never arm one.
    fn set_text(&mut self, value: String) {
        if !self.primed && self.queue.is_empty() {
            tracing::debug!(%value, "showing first value without transition");
            self.primed = true;
            self.host.surface_mut(SurfaceId::Primary).set_text(&value);
            self.displayed = value;
            return;
        }

        self.queue.push(value);
        tracing::debug!(pending = self.queue.len(), "value queued");

        if self.timer.is_none() {
            self.begin_next();
            if !self.queue.is_empty() {
                self.arm();
            }
        }
    }

    fn tick(&mut self, generation: u64) {
        if self.timer.map(|t| t.generation) != Some(generation) {
            tracing::trace!(generation, "ignoring stale tick");
            return;
        }
        if !self.begin_next() {
            self.disarm();
        }
    }

    /// Start the transition for the first entry that has not started yet.
    fn begin_next(&mut self) -> bool {
        let index = self.in_flight.len();
        let Some(value) = self.queue.get(index).map(str::to_owned) else {
            return false;
        };

        self.next_transition += 1;
        let id = self.next_transition;
        let plan = Choreography::plan(self.style, &self.timing, &value);
        tracing::debug!(
            id,
            style = %self.style,
            %value,
            phases = plan.phases.len(),
            "transition started"
        );

        for command in &plan.setup {
            command.apply(&mut self.host);
        }
        self.in_flight.push(InFlight {
            id,
            plan,
            next_phase: 0,
            started_at: Utc::now(),
            done: false,
        });
        self.advance_phase(id);
        true
    }

    /// Run the next phase of transition `id`, or mark it done.
    fn advance_phase(&mut self, id: u64) {
        let Some(flight) = self.in_flight.iter_mut().find(|t| t.id == id) else {
            debug_assert!(false, "completion for unknown transition {id}");
            return;
        };

        match flight.plan.phases.get(flight.next_phase).cloned() {
            Some(animation) => {
                flight.next_phase += 1;
                let on_complete = self.completion(id);
                self.host.animate(animation, on_complete);
            }
            None => {
                flight.done = true;
                self.retire();
            }
        }
    }

    /// Finish done transitions from the front, in start order.
    ///
    /// A transition that outpaces an earlier one (after a restyle shortened
    /// the duration) waits here so the queue front always matches.
    fn retire(&mut self) {
        let mut retired = 0;
        while self.in_flight.first().is_some_and(|t| t.done) {
            let flight = self.in_flight.remove(0);
            self.finish(flight);
            retired += 1;
        }
        if retired > 1 {
            // An earlier settle may have overwritten text set at start.
            let displayed = self.displayed.clone();
            self.host.surface_mut(SurfaceId::Primary).set_text(&displayed);
        }
    }

    fn finish(&mut self, flight: InFlight) {
        for command in &flight.plan.finish {
            command.apply(&mut self.host);
        }

        let popped = self.queue.pop_front();
        debug_assert!(popped.is_some(), "finished a transition with an empty queue");

        let from = std::mem::replace(&mut self.displayed, flight.plan.value);
        tracing::debug!(
            id = flight.id,
            %from,
            to = %self.displayed,
            pending = self.queue.len(),
            "transition finished"
        );
        self.history.record(TransitionRecord {
            from,
            to: self.displayed.clone(),
            style: flight.plan.style,
            started_at: flight.started_at,
            completed_at: Utc::now(),
        });
    }

    fn arm(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let period = self.timing.interval_span();
        let this = self.this.clone();
        let handle = self.host.schedule(
            period,
            Box::new(move || {
                if let Some(shared) = this.upgrade() {
                    shared.submit(Command::Tick { generation });
                }
            }),
        );
        tracing::debug!(?period, generation, "drain timer armed");
        self.timer = Some(ArmedTimer { handle, generation });
    }

    fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            tracing::debug!(generation = timer.generation, "drain timer cancelled");
            self.host.cancel(timer.handle);
        }
    }

    fn completion(&self, transition: u64) -> Completion {
        let this = self.this.clone();
        Box::new(move || {
            if let Some(shared) = this.upgrade() {
                shared.submit(Command::PhaseComplete { transition });
            }
        })
    }

    fn each_surface(&mut self, mut f: impl FnMut(&mut H::Surface)) {
        f(self.host.surface_mut(SurfaceId::Primary));
        f(self.host.surface_mut(SurfaceId::Ghost));
    }

    pub(crate) fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Whether anything has been shown yet.
    pub(crate) fn is_primed(&self) -> bool {
        self.primed
    }

    pub(crate) fn style(&self) -> TransitionStyle {
        self.style
    }

    pub(crate) fn timing(&self) -> Timing {
        self.timing
    }

    pub(crate) fn status(&self) -> EngineStatus {
        if self.timer.is_some() {
            EngineStatus::Draining
        } else {
            EngineStatus::Idle
        }
    }

    pub(crate) fn queue(&self) -> &PendingQueue {
        &self.queue
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub(crate) fn history(&self) -> &TransitionHistory {
        &self.history
    }

    pub(crate) fn color(&self) -> Option<Color> {
        self.color
    }

    pub(crate) fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub(crate) fn host(&self) -> &H {
        &self.host
    }
}

impl<H: RenderHost + 'static> Drop for Engine<H> {
    fn drop(&mut self) {
        self.disarm();
    }
}
