//! Pointer interaction with bodies: click selection, hover enlargement and dragging.
//!
//! Coordinates are in simulation space; the host inverts its pan/zoom before
//! calling in. Hover, selection and drag are independent tracks, so one body
//! can be hovered, selected and dragged at the same time. A body's display
//! radius is always derived from its resting radius and the tracks it is on,
//! which keeps repeated enter/leave or select/close cycles from drifting.

use crate::{
    body::Body,
    config::{self, HoverTier, SelectionRestore, SimConfig},
    simulation::Simulation,
    vector::Vector2,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    index: usize,
    /// Body position minus pointer position at grab time.
    offset: Vector2,
}

/// Translates pointer input into radius and position changes on a [`Simulation`].
#[derive(Debug, Clone)]
pub struct InteractionController {
    click_factor: f64,
    hover_tiers: Vec<HoverTier>,
    hover_fallback: f64,
    restore: SelectionRestore,
    active: Option<usize>,
    drag: Option<Drag>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

impl InteractionController {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            click_factor: config.click_factor,
            hover_tiers: config.hover_tiers.clone(),
            hover_fallback: config.hover_fallback,
            restore: config.selection_restore,
            active: None,
            drag: None,
        }
    }

    /// Index of the currently selected body.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Index of the body being dragged.
    pub fn dragging(&self) -> Option<usize> {
        self.drag.map(|drag| drag.index)
    }

    /// Forgets selection and drag state, e.g. after the body set was replaced.
    pub fn reset(&mut self) {
        self.active = None;
        self.drag = None;
    }

    /// First body in seed order whose display radius contains `point`.
    pub fn hit_test(&self, sim: &Simulation, point: Vector2) -> Option<usize> {
        sim.bodies().iter().position(|body| body.contains(point))
    }

    /// Selects the body under `point` and enlarges it by the click factor.
    ///
    /// Returns the selected body's name for the host to resolve into display text.
    /// Under [`SelectionRestore::OnClose`] a click while a selection is active only
    /// closes that selection and returns `None`. Under
    /// [`SelectionRestore::OnReselect`] the previous selection is restored and the
    /// body under `point` is selected; clicking it again does not compound.
    pub fn on_click(&mut self, sim: &mut Simulation, point: Vector2) -> Option<String> {
        if self.restore == SelectionRestore::OnClose && self.active.is_some() {
            self.close_selection(sim);
            return None;
        }

        let hit = self.hit_test(sim, point)?;
        if let Some(previous) = self.active.filter(|&previous| previous != hit) {
            self.deselect(sim, previous);
        }

        let body = sim.body_mut(hit)?;
        body.is_selected = true;
        self.refresh(body);
        self.active = Some(hit);

        log::debug!("selected {}", body.name);
        Some(body.name.clone())
    }

    /// Drops the click enlargement of the active body (the host closed its info view).
    pub fn close_selection(&mut self, sim: &mut Simulation) {
        if let Some(index) = self.active.take() {
            self.deselect(sim, index);
        }
    }

    /// Applies hover enlargement to bodies the pointer entered and removes it
    /// from bodies the pointer left. Returns true if any radius changed.
    pub fn on_hover(&mut self, sim: &mut Simulation, point: Vector2) -> bool {
        let mut changed = false;
        for body in sim.bodies_mut() {
            let inside = body.contains(point);
            if inside != body.is_hovered {
                body.is_hovered = inside;
                self.refresh(body);
                changed = true;
            }
        }
        changed
    }

    /// Grabs the body under `point`. Until [`InteractionController::on_drag_end`]
    /// it follows the pointer and is excluded from integration.
    pub fn on_drag_start(&mut self, sim: &mut Simulation, point: Vector2) -> Option<usize> {
        self.on_drag_end(sim);

        let index = self.hit_test(sim, point)?;
        let body = sim.body_mut(index)?;
        body.is_dragged = true;
        self.drag = Some(Drag {
            index,
            offset: body.pos - point,
        });

        log::debug!("drag started on {}", body.name);
        Some(index)
    }

    /// Moves the grabbed body so it keeps its grab offset from the pointer.
    pub fn on_drag_move(&mut self, sim: &mut Simulation, point: Vector2) {
        if let Some(drag) = self.drag {
            if let Some(body) = sim.body_mut(drag.index) {
                body.pos = point + drag.offset;
            }
        }
    }

    pub fn on_drag_end(&mut self, sim: &mut Simulation) {
        if let Some(drag) = self.drag.take() {
            if let Some(body) = sim.body_mut(drag.index) {
                body.is_dragged = false;
                log::debug!("drag ended on {}", body.name);
            }
        }
    }

    /// Changes a body's resting radius, keeping any hover or click enlargement.
    pub fn set_base_radius(&self, sim: &mut Simulation, index: usize, radius: f64) {
        if let Some(body) = sim.body_mut(index) {
            body.base_radius = radius.max(0.0);
            self.refresh(body);
        }
    }

    fn deselect(&self, sim: &mut Simulation, index: usize) {
        if let Some(body) = sim.body_mut(index) {
            body.is_selected = false;
            self.refresh(body);
        }
    }

    /// Recomputes the display radius from the resting radius and the active tracks.
    fn refresh(&self, body: &mut Body) {
        let mut radius = body.base_radius;
        if body.is_hovered {
            radius *= config::hover_factor(&self.hover_tiers, self.hover_fallback, body.base_radius);
        }
        if body.is_selected {
            radius *= self.click_factor;
        }
        body.display_radius = radius.max(0.0);
    }
}
