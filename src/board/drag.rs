//! Drag interaction: turns a pick-up / hover / drop gesture into at most one
//! [`MoveIntent`].
//!
//! Sensors (keyboard, pointer, scripted) drive a [`GestureHandler`]. The
//! [`DragController`] is the handler the board uses; it forwards intents to
//! an [`IntentSink`] and never sees the store or its errors.

use bugpilot_common::{MoveIntent, Status};
use tokio::sync::mpsc;

/// Gesture callbacks. Any sensor technology can drive these.
pub trait GestureHandler {
    /// Start a drag. `current_status` is captured now and decides the
    /// eventual intent's `from`, even if the item changes lanes mid-drag.
    fn on_pick_up(&mut self, item_id: &str, current_status: Status);

    /// The lane under the pointer changed. `None` means outside every lane.
    fn on_hover_zone_change(&mut self, zone: Option<Status>);

    fn on_drop(&mut self) -> DropOutcome;

    fn on_cancel(&mut self);
}

/// Receives the intents a controller emits.
pub trait IntentSink {
    fn emit(&mut self, intent: MoveIntent);
}

impl IntentSink for mpsc::UnboundedSender<MoveIntent> {
    fn emit(&mut self, intent: MoveIntent) {
        if let Err(err) = self.send(intent) {
            tracing::warn!(item_id = %err.0.item_id, "Board store is gone; dropping move");
        }
    }
}

impl IntentSink for Vec<MoveIntent> {
    fn emit(&mut self, intent: MoveIntent) {
        self.push(intent);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    pub item_id: String,
    pub from: Status,
    pub hover: Option<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragGesture),
}

/// How a gesture ended. The controller is back to `Idle` in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped on another lane; the intent was emitted.
    Moved(MoveIntent),
    /// Dropped on the lane it came from.
    NoOp,
    /// Released outside any lane, aborted, or nothing was being dragged.
    Cancelled,
}

/// Per-lane hover affordance. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneFeedback {
    pub status: Status,
    pub is_over: bool,
    pub can_drop: bool,
}

pub struct DragController<S: IntentSink> {
    sink: S,
    state: DragState,
}

impl<S: IntentSink> DragController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragged_item(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging(g) => Some(&g.item_id),
            DragState::Idle => None,
        }
    }

    /// One entry per lane in board order. Every lane accepts every item.
    pub fn lane_feedback(&self) -> [LaneFeedback; 3] {
        let hover = match &self.state {
            DragState::Dragging(g) => g.hover,
            DragState::Idle => None,
        };
        let dragging = self.is_dragging();
        Status::ALL.map(|status| LaneFeedback {
            status,
            is_over: hover == Some(status),
            can_drop: dragging,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: IntentSink> GestureHandler for DragController<S> {
    fn on_pick_up(&mut self, item_id: &str, current_status: Status) {
        if let DragState::Dragging(prev) = &self.state {
            tracing::debug!(item_id = %prev.item_id, "Abandoning unfinished drag");
        }
        self.state = DragState::Dragging(DragGesture {
            item_id: item_id.to_string(),
            from: current_status,
            hover: None,
        });
    }

    fn on_hover_zone_change(&mut self, zone: Option<Status>) {
        if let DragState::Dragging(g) = &mut self.state {
            g.hover = zone;
        }
    }

    fn on_drop(&mut self) -> DropOutcome {
        let DragState::Dragging(gesture) = std::mem::take(&mut self.state) else {
            return DropOutcome::Cancelled;
        };
        let Some(target) = gesture.hover else {
            tracing::debug!(item_id = %gesture.item_id, "Dropped outside any lane");
            return DropOutcome::Cancelled;
        };
        match MoveIntent::new(gesture.item_id, gesture.from, target) {
            Some(intent) => {
                self.sink.emit(intent.clone());
                DropOutcome::Moved(intent)
            }
            None => DropOutcome::NoOp,
        }
    }

    fn on_cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Keyboard-driven drag: grab a ticket, arrow between lanes, release.
#[derive(Debug, Default)]
pub struct KeyboardSensor {
    focus: Option<Status>,
}

impl KeyboardSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_lane(&self) -> Option<Status> {
        self.focus
    }

    /// Pick up `item_id`. Focus starts on its own lane.
    pub fn grab(&mut self, handler: &mut impl GestureHandler, item_id: &str, current_status: Status) {
        handler.on_pick_up(item_id, current_status);
        self.focus = None;
        self.set_focus(handler, Some(current_status));
    }

    pub fn focus_lane(&mut self, handler: &mut impl GestureHandler, lane: Status) {
        self.set_focus(handler, Some(lane));
    }

    pub fn move_left(&mut self, handler: &mut impl GestureHandler) {
        self.step(handler, -1);
    }

    pub fn move_right(&mut self, handler: &mut impl GestureHandler) {
        self.step(handler, 1);
    }

    pub fn release(&mut self, handler: &mut impl GestureHandler) -> DropOutcome {
        self.focus = None;
        handler.on_drop()
    }

    pub fn escape(&mut self, handler: &mut impl GestureHandler) {
        self.focus = None;
        handler.on_cancel();
    }

    fn step(&mut self, handler: &mut impl GestureHandler, delta: isize) {
        let Some(current) = self.focus else {
            return;
        };
        let idx = Status::ALL.iter().position(|s| *s == current).unwrap_or(0);
        let next = (idx as isize + delta).clamp(0, Status::ALL.len() as isize - 1) as usize;
        self.set_focus(handler, Some(Status::ALL[next]));
    }

    fn set_focus(&mut self, handler: &mut impl GestureHandler, lane: Option<Status>) {
        if self.focus != lane {
            self.focus = lane;
            handler.on_hover_zone_change(lane);
        }
    }
}
