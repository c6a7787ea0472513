use planb_types::{BillingPeriod, NavKey};
use std::time::Instant;
use tokio::sync::mpsc;

use crate::controller::ScrollSample;
use crate::source::PlanSource;
use crate::widget::PlanWidget;

/// Inputs the render layer feeds into a running [`WidgetDriver`]
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetInput {
    Click(usize),
    Key(NavKey),
    Scroll(ScrollSample),
    Billing(BillingPeriod),
    Viewport(f64),
    Reload,
    SetEndpoint(String),
    SetDefaultPlan(Option<String>),
    Shutdown,
}

/// Owns a widget and serializes every input, load completion and timer on
/// one task.
pub struct WidgetDriver<S> {
    widget: PlanWidget<S>,
    inputs: mpsc::UnboundedReceiver<WidgetInput>,
}

impl<S: PlanSource> WidgetDriver<S> {
    pub fn new(widget: PlanWidget<S>) -> (Self, mpsc::UnboundedSender<WidgetInput>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { widget, inputs: rx }, tx)
    }

    pub fn widget(&self) -> &PlanWidget<S> {
        &self.widget
    }

    /// Run until `Shutdown` or every input sender is dropped.
    pub async fn run(mut self) -> PlanWidget<S> {
        loop {
            let deadline = self.widget.next_deadline();

            tokio::select! {
                input = self.inputs.recv() => {
                    match input {
                        None | Some(WidgetInput::Shutdown) => break,
                        Some(input) => self.apply(input),
                    }
                }
                Some(outcome) = self.widget.next_outcome() => {
                    self.widget.apply_outcome(outcome, now());
                }
                _ = sleep_until(deadline) => {
                    self.widget.tick(now());
                }
            }
        }

        tracing::debug!("widget driver stopped");
        self.widget
    }

    fn apply(&mut self, input: WidgetInput) {
        let now = now();
        match input {
            WidgetInput::Click(index) => self.widget.click(index, now),
            WidgetInput::Key(key) => self.widget.key(key, now),
            WidgetInput::Scroll(sample) => self.widget.scroll(sample, now),
            WidgetInput::Billing(period) => self.widget.set_billing(period),
            WidgetInput::Viewport(width) => self.widget.set_viewport_width(width),
            WidgetInput::Reload => {
                self.widget.reload();
            }
            WidgetInput::SetEndpoint(endpoint) => {
                self.widget.set_endpoint(endpoint);
            }
            WidgetInput::SetDefaultPlan(name) => {
                self.widget.set_default_plan(name);
            }
            WidgetInput::Shutdown => {}
        }
    }
}

/// Current time on tokio's clock, so deadlines follow a paused test runtime.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
