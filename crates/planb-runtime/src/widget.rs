use planb_engine::{
    ComparisonTable, LayoutMode, PlanCardView, build_cards, build_comparison, pick_default_index,
};
use planb_types::{
    BillingPeriod, FeatureDictionary, NavKey, PlanRecord, SelectionOrigin, WidgetEvent,
};
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc;

use crate::Result;
use crate::config::WidgetConfig;
use crate::controller::{Effect, ScrollSample, SelectionController};
use crate::events::{self, WidgetEvents};
use crate::loader::{LoadOutcome, LoadToken, PlanLoader};
use crate::source::PlanSource;

pub const LOADING_MESSAGE: &str = "Loading…";
pub const FAILED_MESSAGE: &str = "No data";
pub const EMPTY_MESSAGE: &str = "No plans available yet.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Everything the render layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    pub status: LoadStatus,
    /// Placeholder text shown instead of cards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub cards: Vec<PlanCardView>,
    pub billing: BillingPeriod,
    pub layout: LayoutMode,
    pub active_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonTable>,
}

/// One embedded pricing widget: loader, resolver and selection in one place.
///
/// All methods are synchronous except [`PlanWidget::settle_load`]; time is
/// passed in by the caller.
pub struct PlanWidget<S> {
    endpoint: String,
    default_plan: Option<String>,
    breakpoint: f64,
    loader: PlanLoader<S>,
    controller: SelectionController,
    features: FeatureDictionary,
    status: LoadStatus,
    pending: Option<LoadToken>,
    // Active index from before a failed load, offered to the next success.
    carried_index: Option<usize>,
    layout: LayoutMode,
    scroll_request: Option<usize>,
    events: mpsc::UnboundedSender<WidgetEvent>,
}

impl<S: PlanSource> PlanWidget<S> {
    pub fn new(source: S, config: &WidgetConfig) -> (Self, WidgetEvents) {
        let (tx, events) = events::channel();
        let widget = Self {
            endpoint: config.endpoint_or_default().to_string(),
            default_plan: config.default_plan.clone(),
            breakpoint: config.carousel_breakpoint_px,
            loader: PlanLoader::new(source),
            controller: SelectionController::new(&config.timing),
            features: FeatureDictionary::new(),
            status: LoadStatus::Idle,
            pending: None,
            carried_index: None,
            layout: LayoutMode::default(),
            scroll_request: None,
            events: tx,
        };
        (widget, events)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_plan(&self) -> Option<&str> {
        self.default_plan.as_deref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn plans(&self) -> &[PlanRecord] {
        self.controller.plans()
    }

    pub fn features(&self) -> &FeatureDictionary {
        &self.features
    }

    pub fn active_index(&self) -> usize {
        self.controller.active_index()
    }

    pub fn active_plan(&self) -> Option<&PlanRecord> {
        self.controller.active_plan()
    }

    pub fn billing(&self) -> BillingPeriod {
        self.controller.billing()
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a load of the current endpoint, superseding any load in flight.
    pub fn reload(&mut self) -> LoadToken {
        let token = self.loader.start(self.endpoint.clone());
        tracing::info!(endpoint = %self.endpoint, generation = token.generation(), "loading plans");
        self.pending = Some(token);
        self.status = LoadStatus::Loading;
        token
    }

    /// Point the widget at a new endpoint. Reloads only when it changed.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> Option<LoadToken> {
        let endpoint = endpoint.into();
        if endpoint == self.endpoint {
            return None;
        }
        self.endpoint = endpoint;
        Some(self.reload())
    }

    /// Change the embedding default plan. Reloads only when it changed.
    pub fn set_default_plan(&mut self, name: Option<String>) -> Option<LoadToken> {
        if name == self.default_plan {
            return None;
        }
        self.default_plan = name;
        Some(self.reload())
    }

    /// Wait for the pending load to commit.
    ///
    /// Returns `false` when nothing was pending.
    pub async fn settle_load(&mut self) -> bool {
        while self.pending.is_some() {
            let Some(outcome) = self.loader.next_outcome().await else {
                return false;
            };
            self.apply_outcome(outcome, tokio::time::Instant::now().into_std());
        }
        true
    }

    /// Wait for the next finished load, current or stale.
    pub async fn next_outcome(&mut self) -> Option<LoadOutcome> {
        self.loader.next_outcome().await
    }

    /// Commit a finished load. Stale outcomes are dropped without any state change.
    pub fn apply_outcome(&mut self, outcome: LoadOutcome, now: Instant) -> bool {
        if !self.loader.is_current(&outcome.token) {
            tracing::debug!(
                generation = outcome.token.generation(),
                "dropping superseded load"
            );
            return false;
        }
        self.loader.finish(&outcome.token);
        self.pending = None;

        match outcome.result {
            Ok(catalog) => {
                let previous = self.carried_index.take().or_else(|| {
                    (!self.controller.plans().is_empty()).then(|| self.controller.active_index())
                });
                let index = pick_default_index(
                    &catalog.plans,
                    catalog.default_plan.as_deref(),
                    self.default_plan.as_deref(),
                    previous,
                );
                tracing::info!(
                    plan_count = catalog.plans.len(),
                    active_index = index,
                    "plans ready"
                );
                self.features = catalog.features;
                let effects = self.controller.load_plans(catalog.plans, index, now);
                self.status = LoadStatus::Ready;
                self.dispatch(effects);
            }
            Err(err) => {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "plan load failed");
                if !self.controller.plans().is_empty() {
                    self.carried_index = Some(self.controller.active_index());
                }
                self.controller.clear();
                self.features = FeatureDictionary::new();
                self.scroll_request = None;
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
        true
    }

    /// Validated selection for embedding code.
    pub fn select(&mut self, index: usize, origin: SelectionOrigin, now: Instant) -> Result<()> {
        let effects = self.controller.select(index, origin, now)?;
        self.dispatch(effects);
        Ok(())
    }

    pub fn click(&mut self, index: usize, now: Instant) {
        if let Err(err) = self.select(index, SelectionOrigin::Click, now) {
            tracing::debug!(%err, "ignoring click");
        }
    }

    pub fn key(&mut self, key: NavKey, now: Instant) {
        let effects = self.controller.handle_key(key, now);
        self.dispatch(effects);
    }

    /// Raw carousel scroll sample. Ignored in grid layout.
    pub fn scroll(&mut self, sample: ScrollSample, now: Instant) {
        if !self.layout.scrolls() {
            return;
        }
        self.controller.record_scroll(sample, now);
    }

    /// Fire due timers.
    pub fn tick(&mut self, now: Instant) {
        let effects = self.controller.poll(now);
        self.dispatch(effects);
    }

    pub fn set_billing(&mut self, period: BillingPeriod) {
        let effects = self.controller.set_billing(period);
        self.dispatch(effects);
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        let layout = LayoutMode::for_viewport_width(width, self.breakpoint);
        if layout == self.layout {
            return;
        }
        tracing::debug!(?layout, width, "layout changed");
        self.layout = layout;
        if layout.scrolls() && !self.controller.plans().is_empty() {
            self.scroll_request = Some(self.controller.active_index());
        } else {
            self.scroll_request = None;
        }
    }

    /// Card the render layer should center next, if any.
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_request.take()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_deadline()
    }

    pub fn view(&self) -> WidgetView {
        let plans = self.controller.plans();
        let active_index = self.controller.active_index();
        let billing = self.controller.billing();

        let (status_message, error) = match &self.status {
            LoadStatus::Failed(message) => {
                (Some(FAILED_MESSAGE.to_string()), Some(message.clone()))
            }
            LoadStatus::Loading if plans.is_empty() => (Some(LOADING_MESSAGE.to_string()), None),
            _ if plans.is_empty() => (Some(EMPTY_MESSAGE.to_string()), None),
            _ => (None, None),
        };

        WidgetView {
            status: self.status.clone(),
            status_message,
            error,
            cards: build_cards(plans, active_index, billing),
            billing,
            layout: self.layout,
            active_index,
            comparison: build_comparison(plans, &self.features, active_index),
        }
    }

    fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notify(event) => {
                    // Nobody listening is fine.
                    let _ = self.events.send(event);
                }
                Effect::ScrollIntoView { index } => {
                    if self.layout.scrolls() {
                        self.scroll_request = Some(index);
                    }
                }
            }
        }
    }
}
