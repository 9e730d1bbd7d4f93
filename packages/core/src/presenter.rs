//! Graph presentation: lifetime of the rendering-library instance plus the
//! zoom and layout parameters handed to it.
//!
//! The rendering library (Cytoscape in the browser) sits behind the
//! [`GraphSurface`] trait. [`Presenter`] owns at most one live instance and
//! always releases the old one before acquiring the next, so graph
//! computation never has to know about instance teardown.

use serde::{Deserialize, Serialize};

use crate::graph::GraphModel;

/// Zoom limits and steps for the diagram controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplier applied per zoom-in click (and divisor per zoom-out).
    pub zoom_step: f64,
    /// Padding in pixels around the graph when fitting to the screen.
    pub fit_padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            min_zoom: 0.3,
            max_zoom: 3.0,
            zoom_step: 1.2,
            fit_padding: 60.0,
        }
    }
}

impl Viewport {
    pub fn clamp(&self, level: f64) -> f64 {
        level.clamp(self.min_zoom, self.max_zoom)
    }

    pub fn zoom_in(&self, current: f64) -> f64 {
        self.clamp(current * self.zoom_step)
    }

    pub fn zoom_out(&self, current: f64) -> f64 {
        self.clamp(current / self.zoom_step)
    }

    /// The zoom indicator text, e.g. `"120%"`.
    pub fn indicator(&self, level: f64) -> String {
        format!("{}%", (level * 100.0).round() as i64)
    }
}

/// Hierarchical layout parameters for the surface.
///
/// Serialises to the option object Cytoscape's `breadthfirst` layout expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub name: String,
    pub directed: bool,
    pub spacing_factor: f64,
    pub padding: f64,
    pub roots: Vec<String>,
}

impl LayoutOptions {
    /// Breadth-first layout seeded at the graph's root.
    pub fn breadthfirst(graph: &GraphModel) -> Self {
        Self {
            name: "breadthfirst".into(),
            directed: true,
            spacing_factor: 1.6,
            padding: 50.0,
            roots: vec![graph.root_id.clone()],
        }
    }
}

/// A rendering backend able to draw a [`GraphModel`].
pub trait GraphSurface {
    /// A live drawing, owned by the presenter while mounted.
    type Instance;

    fn mount(&mut self, graph: &GraphModel, layout: &LayoutOptions, viewport: &Viewport)
        -> Self::Instance;

    /// Tear down an instance. Called exactly once per mounted instance.
    fn destroy(&mut self, instance: Self::Instance);

    fn zoom(&self, instance: &Self::Instance) -> f64;

    /// Zoom about the centre of the view.
    fn set_zoom(&mut self, instance: &mut Self::Instance, level: f64);

    fn fit(&mut self, instance: &mut Self::Instance, padding: f64);
}

/// Owns the surface instance for the currently presented graph.
pub struct Presenter<S: GraphSurface> {
    surface: S,
    viewport: Viewport,
    instance: Option<S::Instance>,
}

impl<S: GraphSurface> Presenter<S> {
    pub fn new(surface: S) -> Self {
        Self::with_viewport(surface, Viewport::default())
    }

    pub fn with_viewport(surface: S, viewport: Viewport) -> Self {
        Self {
            surface,
            viewport,
            instance: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_mounted(&self) -> bool {
        self.instance.is_some()
    }

    /// Draw `graph`, replacing whatever was drawn before.
    pub fn present(&mut self, graph: &GraphModel) {
        self.release();
        let layout = LayoutOptions::breadthfirst(graph);
        self.instance = Some(self.surface.mount(graph, &layout, &self.viewport));
        tracing::debug!(root = %graph.root_id, nodes = graph.len(), "graph surface mounted");
    }

    /// Destroy the live instance, if any.
    pub fn release(&mut self) {
        if let Some(instance) = self.instance.take() {
            self.surface.destroy(instance);
        }
    }

    /// Current zoom level, or `None` when nothing is mounted.
    pub fn zoom(&self) -> Option<f64> {
        self.instance.as_ref().map(|i| self.surface.zoom(i))
    }

    pub fn zoom_in(&mut self) -> Option<f64> {
        let level = self.viewport.zoom_in(self.zoom()?);
        self.set_zoom(level)
    }

    pub fn zoom_out(&mut self) -> Option<f64> {
        let level = self.viewport.zoom_out(self.zoom()?);
        self.set_zoom(level)
    }

    pub fn fit(&mut self) {
        if let Some(instance) = self.instance.as_mut() {
            self.surface.fit(instance, self.viewport.fit_padding);
        }
    }

    /// The zoom indicator text for the live instance.
    pub fn indicator(&self) -> Option<String> {
        self.zoom().map(|z| self.viewport.indicator(z))
    }

    fn set_zoom(&mut self, level: f64) -> Option<f64> {
        let instance = self.instance.as_mut()?;
        self.surface.set_zoom(instance, level);
        Some(level)
    }
}

impl<S: GraphSurface> Drop for Presenter<S> {
    fn drop(&mut self) {
        self.release();
    }
}

// --- tests -------------------------------------------------------------------
