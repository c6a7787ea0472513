pub mod config;
pub mod controller;
pub mod driver;
pub mod error;
pub mod events;
pub mod loader;
pub mod source;
pub mod timer;
pub mod widget;

pub use config::{TimingConfig, WidgetConfig};
pub use controller::{Effect, ScrollSample, SelectionController};
pub use driver::{WidgetDriver, WidgetInput};
pub use error::{Error, LoadError, Result};
pub use events::WidgetEvents;
pub use loader::{LoadOutcome, LoadToken, PlanLoader};
pub use source::{EndpointSource, PlanSource, parse_payload};
pub use timer::{TaskHandle, TimerSlot};
pub use widget::{LoadStatus, PlanWidget, WidgetView};
