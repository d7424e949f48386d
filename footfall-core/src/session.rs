use crate::compose::{BaseLayer, ComposedView, compose};
use crate::data::Dataset;
use crate::derived::compute_with;
use crate::selection::{ClickPayload, SelectionController, SelectionState};
use crate::style::MarkerStyle;
use tracing::debug;

/// One user's interaction with a loaded dataset.
///
/// Events are handled one at a time; the dataset itself is shared and
/// never written to.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    controller: SelectionController,
    style: MarkerStyle,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            controller: SelectionController::new(),
            style: MarkerStyle::default(),
        }
    }

    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn state(&self) -> &SelectionState {
        self.controller.state()
    }

    pub fn base_layer(&self) -> BaseLayer {
        BaseLayer::from_pois(self.dataset.pois(), &self.style)
    }

    /// View for the current state without consuming an event.
    pub fn current_view(&self) -> ComposedView {
        self.view_for(self.controller.state())
    }

    pub fn handle(&mut self, payload: &ClickPayload) -> ComposedView {
        self.controller.on_click(payload);
        let view = self.current_view();
        debug!(
            "Composed view with {} overlay markers: {}",
            view.payload.overlay.len(),
            view.summary
        );
        view
    }

    fn view_for(&self, state: &SelectionState) -> ComposedView {
        let derived = compute_with(self.dataset.index(), self.dataset.pois(), state, &self.style);
        compose(derived, state)
    }
}
