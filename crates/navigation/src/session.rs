use runtime::{EventBus, EventKind, Generation, GenerationCounter, Mailbox};
use tour::{ViewpointGraph, ViewpointId};

use crate::button::HotspotButton;
use crate::config::ViewerConfig;
use crate::error::{AssetLoadFailure, SessionError};
use crate::host::{Panorama, Renderer, SwapTicket, UiHost};
use crate::placement::{HotspotPlacement, plan_hotspots};
use crate::style::ButtonStyleSet;

pub type SessionButton<H> = HotspotButton<<H as UiHost>::Button>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Idle(ViewpointId),
    Transitioning { from: ViewpointId, to: ViewpointId },
}

/// Summary of one completed `initialize` or `transition_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReport {
    /// `None` for the initial viewpoint.
    pub from: Option<ViewpointId>,
    pub to: ViewpointId,
    pub disposed: usize,
    pub created: usize,
    /// Ticket of the panorama swap started by this transition.
    pub ticket: SwapTicket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureOutcome {
    Applied,
    Failed(AssetLoadFailure),
    /// Superseded or duplicate completion; nothing happened.
    Stale,
}

struct Plan {
    asset_path: String,
    placements: Vec<HotspotPlacement>,
}

/// Navigation state machine over a validated graph.
///
/// Ordering contract:
/// - Old buttons are all disposed before the panorama swap starts, and the
///   swap starts before any new button is created.
/// - `active_hotspots()` follows the configuration order of the current
///   viewpoint's hotspots.
/// - Button activations never transition directly; they post their target to
///   a latest-wins queue that `pump()` serves.
pub struct Session<H: Renderer + UiHost> {
    graph: ViewpointGraph,
    config: ViewerConfig,
    style: ButtonStyleSet,
    host: H,
    state: SessionState,
    panorama: Option<H::Panorama>,
    active: Vec<SessionButton<H>>,
    hovered: Option<usize>,
    swaps: GenerationCounter,
    pending_swap: Option<SwapTicket>,
    requests: Mailbox<ViewpointId>,
    events: EventBus,
}

impl<H: Renderer + UiHost> Session<H> {
    pub fn new(graph: ViewpointGraph, config: ViewerConfig, host: H) -> Self {
        Self::with_generation(graph, config, host, Generation::default())
    }

    /// Session whose swap tickets continue after `last`, typically the final
    /// generation of the session it replaces. Completions addressed to the
    /// old session can then never match a ticket of this one.
    pub fn with_generation(
        graph: ViewpointGraph,
        config: ViewerConfig,
        host: H,
        last: Generation,
    ) -> Self {
        let style = config.button_style();
        Self {
            graph,
            config,
            style,
            host,
            state: SessionState::Uninitialized,
            panorama: None,
            active: Vec::new(),
            hovered: None,
            swaps: GenerationCounter::continuing_from(last),
            pending_swap: None,
            requests: Mailbox::new(),
            events: EventBus::new(),
        }
    }

    /// Shows the starting viewpoint. Must be called exactly once.
    pub fn initialize(&mut self) -> Result<TransitionReport, SessionError> {
        if self.state != SessionState::Uninitialized {
            return Err(SessionError::AlreadyInitialized);
        }
        let start = self.graph.starting_id().clone();
        let plan = self.plan(&start)?;

        let panorama = self
            .host
            .create_panorama(&plan.asset_path, self.config.dome_diameter);
        self.panorama = Some(panorama);
        let ticket = self.begin_swap(&plan.asset_path);

        if !self.config.welcome_message.is_empty() {
            self.host.show_info(
                &self.config.welcome_message,
                self.config.welcome_duration_ms,
                self.config.welcome_delay_ms,
            );
        }

        let created = self.spawn_buttons(plan.placements);
        self.state = SessionState::Idle(start.clone());
        tracing::info!(viewpoint = %start, buttons = created, "session initialized");

        Ok(TransitionReport {
            from: None,
            to: start,
            disposed: 0,
            created,
            ticket,
        })
    }

    /// Moves to `target`: tears down the old buttons, starts the panorama swap
    /// and creates the new buttons. Returns without waiting for the texture.
    ///
    /// The session is only `Transitioning` inside this call, and `&mut self`
    /// keeps host callbacks from re-entering it, so the `ConcurrentTransition`
    /// arm is a guard the borrow checker already enforces. Overlapping
    /// navigation goes through [`Session::request`] and [`Session::pump`].
    pub fn transition_to(&mut self, target: &ViewpointId) -> Result<TransitionReport, SessionError> {
        if self.state == SessionState::Uninitialized {
            return Err(SessionError::NotInitialized);
        }
        let plan = match self.plan(target) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::error!(target = %target, "transition to unknown viewpoint");
                self.emit(EventKind::Rejected, format!("unknown viewpoint {target}"));
                return Err(err);
            }
        };

        let from = match &self.state {
            SessionState::Idle(current) => current.clone(),
            SessionState::Transitioning { to, .. } => {
                let in_flight = to.clone();
                tracing::warn!(requested = %target, in_flight = %in_flight, "transition refused");
                self.emit(EventKind::Rejected, format!("{target} while entering {in_flight}"));
                return Err(SessionError::ConcurrentTransition {
                    requested: target.clone(),
                    in_flight,
                });
            }
            SessionState::Uninitialized => return Err(SessionError::NotInitialized),
        };

        self.state = SessionState::Transitioning {
            from: from.clone(),
            to: target.clone(),
        };
        tracing::info!(from = %from, to = %target, "transition");
        self.emit(EventKind::Transition, format!("{from} -> {target}"));

        let disposed = self.dispose_buttons();
        let ticket = self.begin_swap(&plan.asset_path);
        let created = self.spawn_buttons(plan.placements);

        self.state = SessionState::Idle(target.clone());
        Ok(TransitionReport {
            from: Some(from),
            to: target.clone(),
            disposed,
            created,
            ticket,
        })
    }

    /// Reports the outcome of the panorama load tagged with `ticket`.
    pub fn texture_loaded(
        &mut self,
        ticket: SwapTicket,
        result: Result<(), AssetLoadFailure>,
    ) -> TextureOutcome {
        if self.pending_swap != Some(ticket) {
            tracing::debug!(
                generation = %ticket.generation,
                current = %self.swaps.current(),
                "ignoring stale texture completion"
            );
            self.emit(EventKind::StaleCompletion, ticket.generation.to_string());
            return TextureOutcome::Stale;
        }
        self.pending_swap = None;
        self.host.hide_loading();
        self.emit(EventKind::Idle, "texture settled");

        match result {
            Ok(()) => TextureOutcome::Applied,
            Err(failure) => {
                tracing::warn!(asset = %failure.asset_path, reason = %failure.reason, "panorama failed to load");
                self.emit(EventKind::LoadFailure, failure.to_string());
                self.host.show_info(
                    &self.config.load_failure_message,
                    self.config.notice_duration_ms,
                    0,
                );
                self.emit(EventKind::Notice, self.config.load_failure_message.clone());
                TextureOutcome::Failed(failure)
            }
        }
    }

    /// Serves the latest queued navigation request, if any.
    pub fn pump(&mut self) -> Result<Option<TransitionReport>, SessionError> {
        match self.requests.take() {
            Some(target) => self.transition_to(&target).map(Some),
            None => Ok(None),
        }
    }

    /// Queues a navigation request the same way a button click does.
    pub fn request(&self, target: ViewpointId) -> bool {
        self.requests.post(target)
    }

    /// Moves the hover highlight to the button at `index` (or clears it).
    pub fn hover(&mut self, index: Option<usize>) {
        if self.hovered == index {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            if let Some(button) = self.active.get_mut(previous) {
                button.pointer_leave();
            }
        }
        if let Some(index) = index {
            if let Some(button) = self.active.get_mut(index) {
                button.pointer_enter();
                self.hovered = Some(index);
            }
        }
    }

    /// Clicks the button at `index`. The transition happens on the next `pump()`.
    pub fn activate(&mut self, index: usize) -> bool {
        let already_pending = self.requests.is_pending();
        let Some(button) = self.active.get_mut(index) else {
            return false;
        };
        let target = button.target().clone();
        if !button.activate() {
            return false;
        }
        if already_pending {
            tracing::debug!(target = %target, "navigation request coalesced");
            self.emit(EventKind::Rejected, format!("coalesced into {target}"));
        }
        true
    }

    /// Disposes every button and the panorama.
    pub fn shutdown(&mut self) {
        if self.state == SessionState::Uninitialized && self.panorama.is_none() {
            return;
        }
        let disposed = self.dispose_buttons();
        if let Some(mut panorama) = self.panorama.take() {
            panorama.dispose();
        }
        if self.pending_swap.take().is_some() {
            self.host.hide_loading();
        }
        self.requests.take();
        self.state = SessionState::Uninitialized;
        tracing::info!(disposed, "session shut down");
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_viewpoint(&self) -> Option<&ViewpointId> {
        match &self.state {
            SessionState::Idle(current) => Some(current),
            SessionState::Transitioning { to, .. } => Some(to),
            SessionState::Uninitialized => None,
        }
    }

    pub fn active_hotspots(&self) -> &[SessionButton<H>] {
        &self.active
    }

    /// Index of the first active button whose host handle matches.
    pub fn find_button(&self, mut matches: impl FnMut(&H::Button) -> bool) -> Option<usize> {
        self.active
            .iter()
            .position(|button| button.handle().is_some_and(&mut matches))
    }

    pub fn is_busy(&self) -> bool {
        self.pending_swap.is_some()
    }

    pub fn has_pending_request(&self) -> bool {
        self.requests.is_pending()
    }

    pub fn generation(&self) -> Generation {
        self.swaps.current()
    }

    pub fn graph(&self) -> &ViewpointGraph {
        &self.graph
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    fn plan(&self, target: &ViewpointId) -> Result<Plan, SessionError> {
        let viewpoint = self.graph.resolve(target)?;
        let placements = plan_hotspots(&self.graph, viewpoint, self.config.button_distance())?;
        Ok(Plan {
            asset_path: viewpoint.asset_path.clone(),
            placements,
        })
    }

    fn begin_swap(&mut self, asset_path: &str) -> SwapTicket {
        self.host.show_loading();
        let ticket = SwapTicket {
            generation: self.swaps.bump(),
        };
        self.pending_swap = Some(ticket);
        self.emit(EventKind::Busy, asset_path.to_string());
        if let Some(panorama) = self.panorama.as_mut() {
            panorama.set_texture(asset_path, ticket);
        }
        ticket
    }

    fn dispose_buttons(&mut self) -> usize {
        self.hovered = None;
        let mut disposed = 0;
        for mut button in self.active.drain(..) {
            if button.dispose() {
                disposed += 1;
                self.events.emit(
                    self.swaps.current(),
                    EventKind::ButtonDisposed,
                    button.target().to_string(),
                );
            }
        }
        disposed
    }

    fn spawn_buttons(&mut self, placements: Vec<HotspotPlacement>) -> usize {
        for placement in placements {
            let queue = self.requests.clone();
            let target = placement.target.clone();
            tracing::debug!(
                target = %target,
                x = placement.anchor.x,
                y = placement.anchor.y,
                z = placement.anchor.z,
                "hotspot button"
            );
            let button = HotspotButton::create(
                &mut self.host,
                placement.anchor,
                placement.label,
                placement.target,
                &self.style,
                move || {
                    queue.post(target.clone());
                },
            );
            self.events.emit(
                self.swaps.current(),
                EventKind::ButtonCreated,
                button.target().to_string(),
            );
            self.active.push(button);
        }
        self.active.len()
    }

    fn emit(&mut self, kind: EventKind, message: impl Into<String>) {
        self.events.emit(self.swaps.current(), kind, message);
    }
}

impl<H: Renderer + UiHost> Drop for Session<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
