//! Headless host driven by a virtual clock.
//!
//! `VirtualHost` renders nothing. Animated phases jump their surfaces to the
//! end state immediately and complete when the clock passes their duration;
//! timers fire as the clock advances. Time only moves through
//! [`VirtualClock::advance`], which makes engine behaviour reproducible in
//! tests and headless tools.
//!
//! ```rust
//! use segue::core::TransitionStyle;
//! use segue::engine::QueuedLabel;
//! use segue::host::VirtualHost;
//! use std::time::Duration;
//!
//! let host = VirtualHost::new();
//! let clock = host.clock();
//! let label = QueuedLabel::new(host, TransitionStyle::Bounce);
//!
//! label.set_text("1");
//! label.set_text("2");
//! clock.advance(Duration::from_millis(200));
//!
//! assert_eq!(label.text(), "2");
//! assert!(label.pending().is_empty());
//! ```

use super::{
    Animation, Appearance, Color, Completion, Font, RenderHost, Surface, SurfaceId, TickFn,
    TimerHandle, Transform,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shortest period a virtual timer will run at.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// In-memory surface state.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualSurface {
    pub text: String,
    pub appearance: Appearance,
    pub hidden: bool,
    pub color: Option<Color>,
    pub font: Option<Font>,
}

impl VirtualSurface {
    fn new(hidden: bool) -> Self {
        Self {
            text: String::new(),
            appearance: Appearance::VISIBLE,
            hidden,
            color: None,
            font: None,
        }
    }

    /// Whether the surface is shown, fully opaque and untransformed.
    pub fn is_at_rest(&self) -> bool {
        !self.hidden && self.appearance == Appearance::VISIBLE
    }
}

impl Surface for VirtualSurface {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.appearance.opacity = opacity;
    }

    fn set_transform(&mut self, transform: Transform) {
        self.appearance.transform = transform;
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn set_font(&mut self, font: &Font) {
        self.font = Some(font.clone());
    }
}

/// Something the virtual host did, as seen by the clock.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    AnimationStarted {
        id: u64,
        duration: Duration,
        autoreverse: bool,
    },
    AnimationCompleted {
        id: u64,
    },
    TimerScheduled {
        handle: TimerHandle,
        period: Duration,
    },
    TimerFired {
        handle: TimerHandle,
    },
    TimerCancelled {
        handle: TimerHandle,
    },
}

struct PendingAnimation {
    id: u64,
    due: Duration,
    seq: u64,
    on_complete: Completion,
}

struct VirtualTimer {
    handle: TimerHandle,
    period: Duration,
    next_due: Duration,
    seq: u64,
    // Taken out while the callback runs.
    on_tick: Option<TickFn>,
}

enum Due {
    Completion(Completion),
    Tick(TimerHandle, TickFn),
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    seq: u64,
    next_id: u64,
    animations: Vec<PendingAnimation>,
    timers: Vec<VirtualTimer>,
    log: Vec<(Duration, HostEvent)>,
}

impl ClockState {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn log(&mut self, event: HostEvent) {
        self.log.push((self.now, event));
    }

    // Earliest callback due at or before `until`; ties go to the earliest-created.
    fn take_due(&mut self, until: Duration) -> Option<Due> {
        let animation = self
            .animations
            .iter()
            .enumerate()
            .filter(|(_, a)| a.due <= until)
            .min_by_key(|(_, a)| (a.due, a.seq))
            .map(|(i, a)| (i, a.due, a.seq));
        let timer = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.on_tick.is_some() && t.next_due <= until)
            .min_by_key(|(_, t)| (t.next_due, t.seq))
            .map(|(i, t)| (i, t.next_due, t.seq));

        let take_animation = match (animation, timer) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some((_, a_due, a_seq)), Some((_, t_due, t_seq))) => (a_due, a_seq) <= (t_due, t_seq),
        };

        if take_animation {
            let (index, due, _) = animation?;
            let pending = self.animations.remove(index);
            self.now = due;
            self.log(HostEvent::AnimationCompleted { id: pending.id });
            Some(Due::Completion(pending.on_complete))
        } else {
            let (index, due, _) = timer?;
            let seq = self.next_seq();
            let entry = &mut self.timers[index];
            entry.next_due = due.saturating_add(entry.period);
            entry.seq = seq;
            let handle = entry.handle;
            let on_tick = entry.on_tick.take()?;
            self.now = due;
            self.log(HostEvent::TimerFired { handle });
            Some(Due::Tick(handle, on_tick))
        }
    }

    fn restore_tick(&mut self, handle: TimerHandle, on_tick: TickFn) {
        if let Some(timer) = self.timers.iter_mut().find(|t| t.handle == handle) {
            timer.on_tick = Some(on_tick);
        }
    }
}

/// Shared handle to the virtual clock behind a [`VirtualHost`].
#[derive(Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    /// Current virtual time since the host was created.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Move time forward by `dt`, firing every callback that falls due.
    ///
    /// Callbacks run one at a time in due order, outside any internal
    /// borrow, so they may schedule new work that also falls inside `dt`.
    pub fn advance(&self, dt: Duration) {
        let until = self.now().saturating_add(dt);
        loop {
            let due = self.state.borrow_mut().take_due(until);
            match due {
                None => break,
                Some(Due::Completion(on_complete)) => on_complete(),
                Some(Due::Tick(handle, mut on_tick)) => {
                    on_tick();
                    self.state.borrow_mut().restore_tick(handle, on_tick);
                }
            }
        }
        self.state.borrow_mut().now = until;
    }

    /// Number of animated phases started but not yet completed.
    pub fn running_animations(&self) -> usize {
        self.state.borrow().animations.len()
    }

    /// Number of live timers.
    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Everything logged so far, with the virtual time it happened at.
    pub fn events(&self) -> Vec<(Duration, HostEvent)> {
        self.state.borrow().log.clone()
    }

    /// Count logged events matching `predicate`.
    pub fn count_events(&self, predicate: impl Fn(&HostEvent) -> bool) -> usize {
        self.state
            .borrow()
            .log
            .iter()
            .filter(|(_, e)| predicate(e))
            .count()
    }
}

/// Headless [`RenderHost`] with two in-memory surfaces.
pub struct VirtualHost {
    primary: VirtualSurface,
    ghost: VirtualSurface,
    clock: VirtualClock,
}

impl VirtualHost {
    pub fn new() -> Self {
        Self {
            primary: VirtualSurface::new(false),
            ghost: VirtualSurface::new(true),
            clock: VirtualClock::default(),
        }
    }

    /// A handle to this host's clock; keep it to drive time.
    pub fn clock(&self) -> VirtualClock {
        self.clock.clone()
    }

    pub fn surface(&self, id: SurfaceId) -> &VirtualSurface {
        match id {
            SurfaceId::Primary => &self.primary,
            SurfaceId::Ghost => &self.ghost,
        }
    }
}

impl Default for VirtualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderHost for VirtualHost {
    type Surface = VirtualSurface;

    fn surface_mut(&mut self, id: SurfaceId) -> &mut VirtualSurface {
        match id {
            SurfaceId::Primary => &mut self.primary,
            SurfaceId::Ghost => &mut self.ghost,
        }
    }

    fn animate(&mut self, animation: Animation, on_complete: Completion) {
        if !animation.autoreverse {
            for (id, target) in &animation.targets {
                self.surface_mut(*id).apply(*target);
            }
        }

        let mut state = self.clock.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        let seq = state.next_seq();
        let due = state.now.saturating_add(animation.duration);
        state.log(HostEvent::AnimationStarted {
            id,
            duration: animation.duration,
            autoreverse: animation.autoreverse,
        });
        state.animations.push(PendingAnimation {
            id,
            due,
            seq,
            on_complete,
        });
    }

    fn schedule(&mut self, period: Duration, on_tick: TickFn) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let mut state = self.clock.state.borrow_mut();
        state.next_id += 1;
        let handle = TimerHandle(state.next_id);
        let seq = state.next_seq();
        let next_due = state.now.saturating_add(period);
        state.log(HostEvent::TimerScheduled { handle, period });
        state.timers.push(VirtualTimer {
            handle,
            period,
            next_due,
            seq,
            on_tick: Some(on_tick),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut state = self.clock.state.borrow_mut();
        let before = state.timers.len();
        state.timers.retain(|t| t.handle != handle);
        if state.timers.len() != before {
            state.log(HostEvent::TimerCancelled { handle });
        }
    }
}
