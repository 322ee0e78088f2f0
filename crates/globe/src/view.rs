//! The interactive globe: one owned instance per on-screen view.
//!
//! The host forwards pointer input and calls [`GlobeView::advance`] once per
//! rendered frame; selections come back out through [`GlobeView::drain_events`].

use std::fmt::Display;
use std::sync::Arc;

use formats::{IngestOptions, IngestSummary, Topology, ingest_topology};
use foundation::math::Vec2;
use runtime::event_bus::{Event, EventBus};
use runtime::frame::Frame;
use scene::World;
use scene::camera::{PerspectiveCamera, Viewport};
use scene::entity::CountryId;
use scene::picking::{PickOptions, pick_screen};
use scene::registry::{CountryRecord, CountryRegistry};
use scene::selection::SelectionState;
use tracing::{debug, info, warn};

use crate::config::GlobeConfig;
use crate::controller::GlobeController;
use crate::label::{LOADING_NOTICE, UNAVAILABLE_NOTICE, country_label};

/// Outbound notifications for the host application.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobeEvent {
    /// The navigation delay after a click elapsed without being cancelled.
    CountrySelected(CountryRecord),
    /// The view hid itself after navigating.
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetState {
    NotRequested,
    Loading,
    Ready(IngestSummary),
    Failed(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Coarse interaction state, derived from selection and gesture bookkeeping.
///
/// Precedence: an active drag wins, then a selection, then a hover.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Hovering(CountryId),
    Selected(CountryId),
    Dragging,
}

/// A pressed pointer between down and up.
#[derive(Debug, Copy, Clone)]
struct Gesture {
    kind: PointerKind,
    down_px: Vec2,
    /// Latched once the pointer strays beyond the click threshold.
    exceeded: bool,
}

pub struct GlobeView {
    config: GlobeConfig,
    registry: CountryRegistry,
    world: World,
    selection: SelectionState,
    controller: GlobeController,
    camera: PerspectiveCamera,
    frame: Frame,
    events: EventBus<GlobeEvent>,
    dataset: DatasetState,
    gesture: Option<Gesture>,
    tooltip: Option<String>,
    notice: Option<&'static str>,
    pending_prehighlight: Option<String>,
    running: bool,
}

impl GlobeView {
    pub fn new(config: GlobeConfig, registry: CountryRegistry) -> Self {
        if registry.is_empty() {
            debug!("empty country registry; no country will be navigable");
        }
        let controller = GlobeController::new(&config);
        let camera = PerspectiveCamera::new(
            config.fov_y_deg,
            config.near,
            config.far,
            controller.zoom_distance,
            Viewport::new(1.0, 1.0),
        );
        let mut view = Self {
            config,
            registry,
            world: World::new(),
            selection: SelectionState::new(),
            controller,
            camera,
            frame: Frame::default(),
            events: EventBus::new(),
            dataset: DatasetState::NotRequested,
            gesture: None,
            tooltip: None,
            notice: None,
            pending_prehighlight: None,
            running: false,
        };
        view.sync_scene();
        view
    }

    /// Makes the view visible and restarts frame updates from the prior
    /// rotation and zoom.
    ///
    /// `preselected_iso2` is highlighted without arming navigation. Returns
    /// `true` when the host should fetch the boundary dataset and hand it to
    /// [`GlobeView::load_dataset`].
    pub fn show(&mut self, width: f64, height: f64, preselected_iso2: Option<&str>) -> bool {
        // A timer from a previous session must never close the fresh view.
        self.selection.cancel_navigation();
        self.resize(width, height);
        self.sync_scene();
        self.running = true;
        self.pending_prehighlight = preselected_iso2.map(str::to_string);

        let needs_dataset = match self.dataset {
            DatasetState::NotRequested | DatasetState::Failed(_) => {
                self.dataset = DatasetState::Loading;
                self.notice = Some(LOADING_NOTICE);
                true
            }
            DatasetState::Loading => false,
            DatasetState::Ready(_) => {
                self.apply_pending_prehighlight();
                false
            }
        };
        debug!(width, height, needs_dataset, "globe shown");
        needs_dataset
    }

    /// Stops frame updates. Rotation, zoom and highlights are kept.
    pub fn hide(&mut self) {
        let cancelled = self.selection.cancel_navigation();
        self.running = false;
        self.gesture = None;
        self.controller.on_pointer_up();
        debug!(cancelled, "globe hidden");
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.viewport = Viewport::new(width, height);
    }

    /// Builds the scene from a fetched topology, once per view.
    ///
    /// A failed load leaves the scene empty and raises a persistent notice;
    /// the next [`GlobeView::show`] asks for the dataset again.
    pub fn load_dataset<E: Display>(
        &mut self,
        loaded: Result<Arc<Topology>, E>,
    ) -> Option<IngestSummary> {
        if let DatasetState::Ready(_) = self.dataset {
            debug!("globe scene already built");
            return None;
        }
        let topology = match loaded {
            Ok(topology) => topology,
            Err(err) => {
                self.fail_dataset(err.to_string());
                return None;
            }
        };

        let opts = IngestOptions {
            outline_radius: self.config.outline_radius,
            pick_radius: self.config.pick_radius,
        };
        let mut world = World::with_palette(*self.world.palette());
        match ingest_topology(
            &mut world,
            &topology,
            &self.config.topology_object,
            &self.registry,
            opts,
        ) {
            Ok(summary) => {
                info!(
                    countries = summary.countries,
                    matched = summary.matched,
                    skipped = summary.skipped,
                    "globe scene built"
                );
                self.world = world;
                self.selection = SelectionState::new();
                self.dataset = DatasetState::Ready(summary);
                self.notice = None;
                self.sync_scene();
                self.apply_pending_prehighlight();
                Some(summary)
            }
            Err(err) => {
                self.fail_dataset(err.to_string());
                None
            }
        }
    }

    fn fail_dataset(&mut self, reason: String) {
        warn!(%reason, "map data unavailable");
        self.dataset = DatasetState::Failed(reason);
        self.notice = Some(UNAVAILABLE_NOTICE);
    }

    /// One render frame: camera update, shared rotation, then the navigation timer.
    pub fn advance(&mut self, dt_s: f64) {
        if !self.running {
            return;
        }
        self.frame = self.frame.advance(dt_s);
        self.controller.update(self.frame.dt_s);
        self.sync_scene();

        if let Some(country) = self.selection.poll_navigation(self.frame.time) {
            self.navigate(country);
        }
    }

    fn navigate(&mut self, country: CountryId) {
        let Some(record) = self.world.country(country).and_then(|c| c.record.clone()) else {
            return;
        };
        info!(id = %record.id, name = %record.name, "navigating to country");
        self.events
            .emit(self.frame, GlobeEvent::CountrySelected(record));
        self.hide();
        self.events.emit(self.frame, GlobeEvent::Closed);
    }

    fn sync_scene(&mut self) {
        self.world.set_rotation(self.controller.rotation());
        self.camera.distance = self.controller.zoom_distance;
    }

    /// Nearest country under a surface-relative pixel.
    pub fn pick(&self, pos_px: Vec2) -> Option<CountryId> {
        let camera = self.camera;
        pick_screen(
            &self.world,
            pos_px.x,
            pos_px.y,
            |x, y| camera.ray_from_pixel(Vec2::new(x, y)),
            PickOptions::default(),
        )
        .map(|hit| hit.country)
    }

    pub fn pointer_down(&mut self, pos_px: Vec2, kind: PointerKind) {
        self.gesture = Some(Gesture {
            kind,
            down_px: pos_px,
            exceeded: false,
        });
        self.controller.on_pointer_down(pos_px);
    }

    /// Drags while a pointer is pressed, hovers otherwise.
    ///
    /// Drag positions are not clipped to the surface.
    pub fn pointer_move(&mut self, pos_px: Vec2) {
        if let Some(mut gesture) = self.gesture {
            if !self.within_click(gesture, pos_px) {
                gesture.exceeded = true;
                self.gesture = Some(gesture);
            }
            self.controller.on_pointer_move(pos_px);
            return;
        }

        if !self.camera.viewport.contains(pos_px) {
            self.pointer_leave();
            return;
        }
        let hit = self.pick(pos_px);
        if self.selection.hover(&mut self.world, hit) {
            self.refresh_tooltip();
        }
    }

    /// Pointer left the render surface.
    pub fn pointer_leave(&mut self) {
        if self.selection.clear_hover(&mut self.world) {
            self.refresh_tooltip();
        }
    }

    /// Ends a gesture; a press that never strayed past the threshold is a click.
    pub fn pointer_up(&mut self, pos_px: Vec2) {
        self.controller.on_pointer_up();
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let is_click = !gesture.exceeded && self.within_click(gesture, pos_px);
        if !is_click || !self.camera.viewport.contains(pos_px) {
            return;
        }
        if let Some(country) = self.pick(pos_px) {
            self.select(country);
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.controller.on_pointer_up();
        self.gesture = None;
    }

    pub fn double_click(&mut self) {
        self.controller.resume_auto_spin();
    }

    pub fn wheel(&mut self, delta: f64) {
        self.controller.on_wheel(delta);
    }

    /// Mouse clicks allow up to the threshold; touch taps must stay strictly under it.
    fn within_click(&self, gesture: Gesture, pos_px: Vec2) -> bool {
        let moved = pos_px.distance(gesture.down_px);
        match gesture.kind {
            PointerKind::Mouse => moved <= self.config.mouse_click_threshold_px,
            PointerKind::Touch => moved < self.config.touch_click_threshold_px,
        }
    }

    /// User selection: highlight, center the camera and arm navigation.
    ///
    /// Countries without a registry record only get the highlight.
    fn select(&mut self, country: CountryId) {
        self.selection.cancel_navigation();
        self.selection.select(&mut self.world, country);
        self.refresh_tooltip();

        let Some(record) = self.world.country(country).and_then(|c| c.record.clone()) else {
            debug!(?country, "selected country has no registry record");
            return;
        };
        if let Some((lon, lat)) = record.lon_lat() {
            self.controller.center_on(lon, lat);
        }
        let due = self.frame.time.after(self.config.navigation_delay_s);
        self.selection.arm_navigation(due, country);
        debug!(id = %record.id, due = due.0, "navigation armed");
    }

    /// Highlights the country with `iso2` as selected, without navigation.
    ///
    /// Deferred until the scene is built when called early.
    pub fn pre_highlight(&mut self, iso2: &str) -> Option<CountryId> {
        if !matches!(self.dataset, DatasetState::Ready(_)) {
            self.pending_prehighlight = Some(iso2.to_string());
            return None;
        }
        let Some(country) = self.world.find_by_iso2(iso2) else {
            debug!(iso2, "pre-highlight target not in scene");
            return None;
        };
        self.selection.select(&mut self.world, country);
        self.refresh_tooltip();
        Some(country)
    }

    fn apply_pending_prehighlight(&mut self) {
        if let Some(iso2) = self.pending_prehighlight.take() {
            self.pre_highlight(&iso2);
        }
    }

    fn refresh_tooltip(&mut self) {
        self.tooltip = self
            .selection
            .hovered()
            .or(self.selection.selected())
            .and_then(|id| self.world.country(id))
            .map(|c| country_label(c.iso2(), &c.display_name));
    }

    pub fn drain_events(&mut self) -> Vec<Event<GlobeEvent>> {
        self.events.drain()
    }

    pub fn phase(&self) -> InteractionPhase {
        if self.gesture.is_some_and(|g| g.exceeded) {
            return InteractionPhase::Dragging;
        }
        match (self.selection.selected(), self.selection.hovered()) {
            (Some(selected), _) => InteractionPhase::Selected(selected),
            (None, Some(hovered)) => InteractionPhase::Hovering(hovered),
            (None, None) => InteractionPhase::Idle,
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Loading or failure message for the host to display.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn dataset_state(&self) -> &DatasetState {
        &self.dataset
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn controller(&self) -> &GlobeController {
        &self.controller
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }
}
