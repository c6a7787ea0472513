// Active-card selection state machine
//
// Three input channels drive one index: clicks, keyboard and settled scroll
// positions. All of them funnel through `select`. A programmatic scroll (after
// click, keyboard or reload) arms a suppression window during which scroll
// evaluations are ignored, so the widget never reads its own smooth scroll
// back as a user gesture. Raw scroll samples are debounced: only the latest
// sample is evaluated once scrolling has been quiet for `settle_delay`.

use planb_engine::nearest_card_index;
use planb_types::{
    BillingPeriod, Error, NavKey, PlanRecord, Result, SelectionOrigin, SelectionState, WidgetEvent,
};
use std::time::{Duration, Instant};

use crate::config::TimingConfig;
use crate::timer::TimerSlot;

/// Side effects requested by the controller, applied by the widget
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver a notification to listeners
    Notify(WidgetEvent),

    /// Center this card in the carousel
    ScrollIntoView { index: usize },
}

/// Scroll geometry reported by the render layer
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSample {
    /// Center of the visible scroll viewport
    pub center_offset: f64,
    /// Center of each card, indexed like the plan list
    pub card_centers: Vec<f64>,
}

pub struct SelectionController {
    plans: Vec<PlanRecord>,
    active_index: usize,
    billing: BillingPeriod,
    suppress_window: Duration,
    settle_delay: Duration,
    suppression: TimerSlot,
    settle: TimerSlot,
    pending_sample: Option<ScrollSample>,
}

impl SelectionController {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            plans: Vec::new(),
            active_index: 0,
            billing: BillingPeriod::default(),
            suppress_window: timing.suppress_window(),
            settle_delay: timing.settle_delay(),
            suppression: TimerSlot::new(),
            settle: TimerSlot::new(),
            pending_sample: None,
        }
    }

    pub fn plans(&self) -> &[PlanRecord] {
        &self.plans
    }

    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_plan(&self) -> Option<&PlanRecord> {
        self.plans.get(self.active_index)
    }

    pub fn billing(&self) -> BillingPeriod {
        self.billing
    }

    pub fn state(&self) -> SelectionState {
        SelectionState {
            active_index: self.active_index,
            billing: self.billing,
        }
    }

    pub fn is_scroll_suppressed(&self, now: Instant) -> bool {
        self.suppression.is_armed_at(now)
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.settle.deadline(), self.suppression.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Replace the plan list after a load. The new index is applied silently.
    pub fn load_plans(
        &mut self,
        plans: Vec<PlanRecord>,
        default_index: usize,
        now: Instant,
    ) -> Vec<Effect> {
        self.plans = plans;
        self.active_index = if default_index < self.plans.len() {
            default_index
        } else {
            0
        };
        self.discard_pending_scroll();

        if self.plans.is_empty() {
            self.suppression.cancel();
            return Vec::new();
        }

        tracing::debug!(
            plan_count = self.plans.len(),
            active_index = self.active_index,
            "plans loaded"
        );
        self.suppression.schedule(now, self.suppress_window);
        vec![Effect::ScrollIntoView {
            index: self.active_index,
        }]
    }

    /// Drop all plans (failed load). Selection becomes inert.
    pub fn clear(&mut self) {
        self.plans.clear();
        self.active_index = 0;
        self.suppression.cancel();
        self.discard_pending_scroll();
    }

    /// Single validated entry point for every selection channel.
    pub fn select(
        &mut self,
        index: usize,
        origin: SelectionOrigin,
        now: Instant,
    ) -> Result<Vec<Effect>> {
        if index >= self.plans.len() {
            return Err(Error::IndexOutOfRange {
                index,
                plan_count: self.plans.len(),
            });
        }
        if index == self.active_index {
            return Ok(Vec::new());
        }

        self.active_index = index;
        tracing::debug!(index, %origin, "active plan changed");

        let mut effects = Vec::new();
        if origin.is_user_interactive() {
            effects.push(Effect::Notify(WidgetEvent::SelectionChanged {
                index,
                plan: self.plans[index].clone(),
            }));
        }
        if origin.scrolls_programmatically() {
            // A gesture sampled before this selection must not override it later.
            self.discard_pending_scroll();
            self.suppression.schedule(now, self.suppress_window);
            effects.push(Effect::ScrollIntoView { index });
        }
        Ok(effects)
    }

    pub fn handle_key(&mut self, key: NavKey, now: Instant) -> Vec<Effect> {
        match key.target(self.active_index, self.plans.len()) {
            Some(target) => self
                .select(target, SelectionOrigin::Keyboard, now)
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Record a raw scroll sample and restart the settle timer.
    pub fn record_scroll(&mut self, sample: ScrollSample, now: Instant) {
        if self.plans.is_empty() {
            return;
        }
        self.pending_sample = Some(sample);
        self.settle.schedule(now, self.settle_delay);
    }

    /// Select the card closest to the viewport center, unless suppressed.
    pub fn sync_from_scroll_position(
        &mut self,
        center_offset: f64,
        card_centers: &[f64],
        now: Instant,
    ) -> Vec<Effect> {
        let Some(nearest) = nearest_card_index(center_offset, card_centers) else {
            return Vec::new();
        };
        if nearest == self.active_index {
            return Vec::new();
        }
        if self.is_scroll_suppressed(now) {
            tracing::trace!(nearest, "scroll evaluation suppressed");
            return Vec::new();
        }

        self.select(nearest, SelectionOrigin::Scroll, now)
            .unwrap_or_else(|err| {
                tracing::debug!(%err, "ignoring stale scroll geometry");
                Vec::new()
            })
    }

    pub fn set_billing(&mut self, period: BillingPeriod) -> Vec<Effect> {
        if period == self.billing {
            return Vec::new();
        }
        self.billing = period;
        vec![Effect::Notify(WidgetEvent::BillingChanged { period })]
    }

    /// Fire due timers.
    ///
    /// A settled scroll is judged at its own deadline, so an evaluation that
    /// fell due inside a suppression window stays suppressed even when polled late.
    pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();

        if let Some((_, settled_at)) = self.settle.fire_if_due(now)
            && let Some(sample) = self.pending_sample.take()
        {
            effects = self.sync_from_scroll_position(
                sample.center_offset,
                &sample.card_centers,
                settled_at,
            );
        }

        if self.suppression.fire_if_due(now).is_some() {
            tracing::trace!("scroll suppression window closed");
        }

        effects
    }

    fn discard_pending_scroll(&mut self) {
        self.settle.cancel();
        self.pending_sample = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn controller_with(names: &[&str], now: Instant) -> SelectionController {
        let mut controller = SelectionController::new(&TimingConfig::default());
        let plans = names.iter().map(|n| PlanRecord::new(*n)).collect();
        controller.load_plans(plans, 0, now);
        // Let the post-load suppression window lapse.
        controller.poll(now + 1000 * MS);
        controller
    }

    fn centers(count: usize) -> Vec<f64> {
        (0..count).map(|i| 150.0 + 300.0 * i as f64).collect()
    }

    fn notified_indices(effects: &[Effect]) -> Vec<usize> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(WidgetEvent::SelectionChanged { index, .. }) => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_click_emits_and_scrolls() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro", "Team"], t0);
        let now = t0 + 2000 * MS;

        let effects = c.select(2, SelectionOrigin::Click, now).unwrap();
        assert_eq!(c.active_index(), 2);
        assert_eq!(notified_indices(&effects), vec![2]);
        assert!(effects.contains(&Effect::ScrollIntoView { index: 2 }));
        assert!(c.is_scroll_suppressed(now + 179 * MS));
        assert!(!c.is_scroll_suppressed(now + 180 * MS));
    }

    #[test]
    fn test_select_same_index_is_noop() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro"], t0);
        let now = t0 + 2000 * MS;

        assert!(c.select(0, SelectionOrigin::Click, now).unwrap().is_empty());
        assert!(!c.is_scroll_suppressed(now));
    }

    #[test]
    fn test_select_out_of_range() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro"], t0);

        let err = c.select(5, SelectionOrigin::Click, t0).unwrap_err();
        assert_eq!(
            err,
            Error::IndexOutOfRange {
                index: 5,
                plan_count: 2
            }
        );
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_scroll_within_suppression_window_is_ignored() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro", "Team", "Enterprise"], t0);
        let now = t0 + 2000 * MS;

        c.select(1, SelectionOrigin::Click, now).unwrap();
        let effects = c.sync_from_scroll_position(1000.0, &centers(4), now + 50 * MS);

        assert!(effects.is_empty());
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_scroll_after_window_selects_silently() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro", "Team", "Enterprise"], t0);
        let now = t0 + 2000 * MS;

        c.select(1, SelectionOrigin::Click, now).unwrap();
        let effects = c.sync_from_scroll_position(1000.0, &centers(4), now + 500 * MS);

        assert!(effects.is_empty());
        assert_eq!(c.active_index(), 3);
    }

    #[test]
    fn test_scroll_is_debounced_until_quiet() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro", "Team", "Enterprise"], t0);
        let now = t0 + 2000 * MS;

        for step in 0..5u32 {
            let sample = ScrollSample {
                center_offset: 150.0 + 150.0 * step as f64,
                card_centers: centers(4),
            };
            c.record_scroll(sample, now + step * 50 * MS);
            c.poll(now + step * 50 * MS + 40 * MS);
            assert_eq!(c.active_index(), 0, "step {}", step);
        }

        // Last sample at +200ms (center 750 -> card 2); quiet until +320ms.
        assert!(c.poll(now + 319 * MS).is_empty());
        assert_eq!(c.active_index(), 0);
        c.poll(now + 320 * MS);
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn test_click_discards_pending_scroll() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro", "Team", "Enterprise"], t0);
        let now = t0 + 2000 * MS;

        c.record_scroll(
            ScrollSample {
                center_offset: 1050.0,
                card_centers: centers(4),
            },
            now,
        );
        c.select(1, SelectionOrigin::Click, now + 10 * MS).unwrap();

        c.poll(now + 1000 * MS);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_late_poll_keeps_settle_inside_window_suppressed() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro", "Team", "Enterprise"], t0);
        let now = t0 + 2000 * MS;

        c.select(1, SelectionOrigin::Click, now).unwrap();
        // Sample taken during the programmatic scroll, settles at +130ms (< +180ms).
        c.record_scroll(
            ScrollSample {
                center_offset: 1050.0,
                card_centers: centers(4),
            },
            now + 10 * MS,
        );

        c.poll(now + 400 * MS);
        assert_eq!(c.active_index(), 1);
        assert!(c.next_deadline().is_none());
    }

    #[test]
    fn test_keyboard_end_on_four_plans() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Basic", "Pro", "Enterprise"], t0);

        let effects = c.handle_key(NavKey::End, t0 + 2000 * MS);
        assert_eq!(c.active_index(), 3);
        assert_eq!(notified_indices(&effects), vec![3]);
        assert!(effects.contains(&Effect::ScrollIntoView { index: 3 }));
    }

    #[test]
    fn test_keyboard_at_bound_is_noop() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro"], t0);

        assert!(c.handle_key(NavKey::Left, t0).is_empty());
        assert!(c.handle_key(NavKey::Home, t0).is_empty());
    }

    #[test]
    fn test_empty_list_is_inert() {
        let t0 = Instant::now();
        let mut c = SelectionController::new(&TimingConfig::default());
        assert!(c.load_plans(Vec::new(), 3, t0).is_empty());

        assert!(c.handle_key(NavKey::End, t0).is_empty());
        assert!(c.select(0, SelectionOrigin::Click, t0).is_err());
        c.record_scroll(
            ScrollSample {
                center_offset: 10.0,
                card_centers: vec![10.0],
            },
            t0,
        );
        assert!(c.poll(t0 + 1000 * MS).is_empty());
        assert_eq!(c.active_index(), 0);
        assert!(c.active_plan().is_none());
    }

    #[test]
    fn test_reload_is_silent_and_suppresses() {
        let t0 = Instant::now();
        let mut c = SelectionController::new(&TimingConfig::default());
        let plans = vec![PlanRecord::new("Free"), PlanRecord::new("Pro")];

        let effects = c.load_plans(plans, 1, t0);
        assert_eq!(effects, vec![Effect::ScrollIntoView { index: 1 }]);
        assert_eq!(c.active_index(), 1);
        assert!(c.is_scroll_suppressed(t0 + 100 * MS));
    }

    #[test]
    fn test_load_with_out_of_range_default_falls_back_to_zero() {
        let t0 = Instant::now();
        let mut c = SelectionController::new(&TimingConfig::default());
        c.load_plans(vec![PlanRecord::new("Free")], 4, t0);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_billing_toggle() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro"], t0);
        c.select(1, SelectionOrigin::Click, t0 + 2000 * MS).unwrap();

        assert!(c.set_billing(BillingPeriod::Monthly).is_empty());
        let effects = c.set_billing(BillingPeriod::Yearly);
        assert_eq!(
            effects,
            vec![Effect::Notify(WidgetEvent::BillingChanged {
                period: BillingPeriod::Yearly
            })]
        );
        assert_eq!(c.state().billing, BillingPeriod::Yearly);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_stale_geometry_is_ignored() {
        let t0 = Instant::now();
        let mut c = controller_with(&["Free", "Pro"], t0);

        let effects = c.sync_from_scroll_position(1050.0, &centers(4), t0 + 2000 * MS);
        assert!(effects.is_empty());
        assert_eq!(c.active_index(), 0);
    }
}
