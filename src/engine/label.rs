//! Public handle to a queued-transition label.

use super::command::Command;
use super::machine::{Engine, LabelSettings};
use crate::checkpoint::{Checkpoint, CHECKPOINT_VERSION};
use crate::core::{EngineStatus, Timing, TransitionHistory, TransitionStyle};
use crate::host::{Color, Font, RenderHost};
use chrono::Utc;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Engine plus the inbox that serializes every mutation.
pub(crate) struct Shared<H: RenderHost + 'static> {
    engine: RefCell<Engine<H>>,
    inbox: RefCell<VecDeque<Command>>,
}

impl<H: RenderHost + 'static> Shared<H> {
    /// Enqueue `command` and drain the inbox unless a drain is already running.
    pub(crate) fn submit(&self, command: Command) {
        self.inbox.borrow_mut().push_back(command);
        self.pump();
    }

    fn pump(&self) {
        // Busy means we were re-entered from inside a command; the outer
        // pump picks up whatever was just queued.
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            match next {
                Some(command) => engine.handle(command),
                None => break,
            }
        }
    }
}

/// A text label that queues value changes and animates them one by one.
///
/// Values passed to [`set_text`](Self::set_text) are shown in order. The
/// first value on a fresh label appears immediately; later values are
/// queued and drained one per `interval`, each with the current style's
/// transition. Reading [`text`](Self::text) returns what is displayed now,
/// not the most recently requested value.
///
/// Clones share the same engine. The engine, and its drain timer, are torn
/// down when the last clone is dropped.
///
/// # Panics
///
/// Read accessors panic if called from inside a [`RenderHost`] method that
/// the engine itself is executing (for example a `Surface::set_text`
/// implementation). Mutators are safe to call from anywhere.
///
/// # Example
///
/// ```rust
/// use segue::core::{EngineStatus, TransitionStyle};
/// use segue::engine::QueuedLabel;
/// use segue::host::VirtualHost;
/// use std::time::Duration;
///
/// let host = VirtualHost::new();
/// let clock = host.clock();
/// let label = QueuedLabel::new(host, TransitionStyle::FlipHorizontal);
///
/// label.set_text("0");
/// assert_eq!(label.text(), "0");
///
/// label.set_text("1");
/// label.set_text("2");
/// assert_eq!(label.status(), EngineStatus::Draining);
///
/// clock.advance(Duration::from_secs(1));
/// assert_eq!(label.text(), "2");
/// assert_eq!(label.status(), EngineStatus::Idle);
/// ```
pub struct QueuedLabel<H: RenderHost + 'static> {
    shared: Rc<Shared<H>>,
}

/// Non-owning handle to a [`QueuedLabel`], safe to keep inside a host.
pub struct WeakLabel<H: RenderHost + 'static> {
    shared: Weak<Shared<H>>,
}

impl<H: RenderHost + 'static> QueuedLabel<H> {
    /// Create a label on `host` using `style` and its default timing.
    pub fn new(host: H, style: TransitionStyle) -> Self {
        Self::with_settings(host, LabelSettings::for_style(style))
    }

    pub(crate) fn with_settings(host: H, settings: LabelSettings) -> Self {
        let shared = Rc::new_cyclic(|this| Shared {
            engine: RefCell::new(Engine::new(host, this.clone(), settings)),
            inbox: RefCell::new(VecDeque::new()),
        });
        Self { shared }
    }

    /// Request that `value` be displayed after everything already queued.
    pub fn set_text(&self, value: impl Into<String>) {
        self.shared.submit(Command::SetText(value.into()));
    }

    /// Switch style and reset timing to that style's defaults.
    ///
    /// Transitions already running keep the style they started with.
    pub fn set_style(&self, style: TransitionStyle) {
        self.shared.submit(Command::SetStyle(style));
    }

    /// Set the animation duration in seconds; see [`Timing::set_duration`].
    pub fn set_duration(&self, seconds: f64) {
        self.shared.submit(Command::SetDuration(seconds));
    }

    /// Set the drain interval in seconds; see [`Timing::set_interval`].
    ///
    /// A timer that is already running keeps its period until it is re-armed.
    pub fn set_interval(&self, seconds: f64) {
        self.shared.submit(Command::SetInterval(seconds));
    }

    /// Override the zoom factor used by bounce and faded-zoom.
    pub fn set_zoom_scale(&self, scale: f64) {
        self.shared.submit(Command::SetZoomScale(scale));
    }

    /// Apply a text colour to both surfaces.
    pub fn set_color(&self, color: Color) {
        self.shared.submit(Command::SetColor(color));
    }

    /// Apply a font to both surfaces.
    pub fn set_font(&self, font: Font) {
        self.shared.submit(Command::SetFont(font));
    }

    /// The value currently displayed.
    pub fn text(&self) -> String {
        self.shared.engine.borrow().displayed().to_string()
    }

    pub fn style(&self) -> TransitionStyle {
        self.shared.engine.borrow().style()
    }

    pub fn timing(&self) -> Timing {
        self.shared.engine.borrow().timing()
    }

    pub fn duration(&self) -> f64 {
        self.timing().duration()
    }

    pub fn interval(&self) -> f64 {
        self.timing().interval()
    }

    pub fn zoom_scale(&self) -> f64 {
        self.timing().zoom_scale()
    }

    pub fn status(&self) -> EngineStatus {
        self.shared.engine.borrow().status()
    }

    /// Values still queued, front first. The front one may be mid-transition.
    pub fn pending(&self) -> Vec<String> {
        self.shared.engine.borrow().queue().to_vec()
    }

    pub fn pending_len(&self) -> usize {
        self.shared.engine.borrow().queue().len()
    }

    /// Number of transitions started but not yet finished.
    pub fn transitions_in_flight(&self) -> usize {
        self.shared.engine.borrow().in_flight()
    }

    /// Completed transitions, oldest first.
    pub fn history(&self) -> TransitionHistory {
        self.shared.engine.borrow().history().clone()
    }

    pub fn color(&self) -> Option<Color> {
        self.shared.engine.borrow().color()
    }

    pub fn font(&self) -> Option<Font> {
        self.shared.engine.borrow().font().cloned()
    }

    /// Snapshot displayed text, pending values and settings.
    pub fn checkpoint(&self) -> Checkpoint {
        let engine = self.shared.engine.borrow();
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            style: engine.style(),
            timing: engine.timing(),
            displayed: engine.is_primed().then(|| engine.displayed().to_string()),
            pending: engine.queue().to_vec(),
            color: engine.color(),
            font: engine.font().cloned(),
            history: engine.history().clone(),
        }
    }

    /// Inspect the host, e.g. to read surface state.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(self.shared.engine.borrow().host())
    }

    pub fn downgrade(&self) -> WeakLabel<H> {
        WeakLabel {
            shared: Rc::downgrade(&self.shared),
        }
    }
}

impl<H: RenderHost + 'static> Clone for QueuedLabel<H> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<H: RenderHost + 'static> WeakLabel<H> {
    /// A strong handle, if the label is still alive.
    pub fn upgrade(&self) -> Option<QueuedLabel<H>> {
        self.shared.upgrade().map(|shared| QueuedLabel { shared })
    }

    /// Queue `value` if the label is still alive; returns whether it was.
    pub fn set_text(&self, value: impl Into<String>) -> bool {
        match self.shared.upgrade() {
            Some(shared) => {
                shared.submit(Command::SetText(value.into()));
                true
            }
            None => false,
        }
    }
}

impl<H: RenderHost + 'static> Clone for WeakLabel<H> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostEvent, SurfaceId, VirtualHost};
    use std::time::Duration;

    fn label(style: TransitionStyle) -> (QueuedLabel<VirtualHost>, crate::host::VirtualClock) {
        let host = VirtualHost::new();
        let clock = host.clock();
        (QueuedLabel::new(host, style), clock)
    }

    #[test]
    fn first_value_is_shown_immediately() {
        let (label, clock) = label(TransitionStyle::None);
        label.set_text("5");

        assert_eq!(label.text(), "5");
        assert!(label.pending().is_empty());
        assert_eq!(label.status(), EngineStatus::Idle);
        assert_eq!(clock.active_timers(), 0);
        label.with_host(|h| assert_eq!(h.surface(SurfaceId::Primary).text, "5"));
    }

    #[test]
    fn none_style_applies_later_values_synchronously() {
        let (label, clock) = label(TransitionStyle::None);
        label.set_text("1");
        label.set_text("2");
        label.set_text("3");

        assert_eq!(label.text(), "3");
        assert!(label.pending().is_empty());
        assert_eq!(label.status(), EngineStatus::Idle);
        assert_eq!(clock.active_timers(), 0);
        assert_eq!(label.history().get_path(), vec!["1", "2", "3"]);
    }

    #[test]
    fn bounce_drains_within_one_interval() {
        let (label, clock) = label(TransitionStyle::Bounce);
        label.set_text("1");
        label.set_text("2");

        assert_eq!(label.status(), EngineStatus::Draining);
        assert_eq!(label.pending(), vec!["2".to_string()]);

        clock.advance(Duration::from_millis(200));
        assert_eq!(label.text(), "2");
        assert!(label.pending().is_empty());
        assert_eq!(label.status(), EngineStatus::Idle);
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn displayed_text_changes_only_on_completion() {
        let (label, clock) = label(TransitionStyle::FadedZoom);
        label.set_text("a");
        label.set_text("b");

        clock.advance(Duration::from_millis(399));
        assert_eq!(label.text(), "a");
        clock.advance(Duration::from_millis(1));
        assert_eq!(label.text(), "b");
    }

    #[test]
    fn setters_do_not_touch_queue_or_status() {
        let (label, _clock) = label(TransitionStyle::FlipVertical);
        label.set_text("a");
        label.set_text("b");

        label.set_style(TransitionStyle::RotateDown);
        label.set_duration(0.5);
        label.set_interval(2.0);

        assert_eq!(label.pending(), vec!["b".to_string()]);
        assert_eq!(label.status(), EngineStatus::Draining);
        assert_eq!(label.style(), TransitionStyle::RotateDown);
        assert_eq!(label.duration(), 0.5);
        assert_eq!(label.interval(), 2.0);
    }

    #[test]
    fn set_style_resets_custom_timing() {
        let (label, _clock) = label(TransitionStyle::Bounce);
        label.set_duration(1.0);
        label.set_zoom_scale(3.0);
        label.set_style(TransitionStyle::Bounce);

        assert_eq!(label.duration(), 0.1);
        assert_eq!(label.interval(), 0.2);
        assert_eq!(label.zoom_scale(), 1.2);
    }

    #[test]
    fn cosmetics_apply_to_both_surfaces() {
        let (label, _clock) = label(TransitionStyle::None);
        label.set_color(Color::WHITE);
        label.set_font(Font::new("Menlo", 18.0));

        label.with_host(|h| {
            for id in [SurfaceId::Primary, SurfaceId::Ghost] {
                assert_eq!(h.surface(id).color, Some(Color::WHITE));
                assert_eq!(h.surface(id).font, Some(Font::new("Menlo", 18.0)));
            }
        });
        assert_eq!(label.color(), Some(Color::WHITE));
    }

    #[test]
    fn dropping_label_cancels_timer() {
        let (label, clock) = label(TransitionStyle::FlipHorizontal);
        label.set_text("a");
        label.set_text("b");
        label.set_text("c");
        assert_eq!(clock.active_timers(), 1);

        drop(label);
        assert_eq!(clock.active_timers(), 0);

        // Outstanding completions find no engine and do nothing.
        clock.advance(Duration::from_secs(2));
        assert_eq!(
            clock.count_events(|e| matches!(e, HostEvent::TimerFired { .. })),
            0
        );
    }

    #[test]
    fn weak_handle_stops_working_after_drop() {
        let (label, _clock) = label(TransitionStyle::None);
        let weak = label.downgrade();
        assert!(weak.set_text("1"));
        assert_eq!(label.text(), "1");

        drop(label);
        assert!(weak.upgrade().is_none());
        assert!(!weak.set_text("2"));
    }

    #[test]
    fn clones_share_one_engine() {
        let (label, _clock) = label(TransitionStyle::None);
        let other = label.clone();
        other.set_text("shared");
        assert_eq!(label.text(), "shared");
    }
}
