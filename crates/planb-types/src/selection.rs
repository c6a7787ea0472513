use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingPeriod::Monthly => write!(f, "monthly"),
            BillingPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BillingPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BillingPeriod::Monthly),
            "yearly" => Ok(BillingPeriod::Yearly),
            other => Err(Error::InvalidBillingPeriod(other.to_string())),
        }
    }
}

/// Which input channel asked for a selection change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrigin {
    Click,
    Keyboard,
    Scroll,
    Reload,
}

impl SelectionOrigin {
    /// Click and keyboard selections are observable by listeners.
    pub fn is_user_interactive(self) -> bool {
        matches!(self, SelectionOrigin::Click | SelectionOrigin::Keyboard)
    }

    /// Origins that cause the widget to scroll the active card into view.
    pub fn scrolls_programmatically(self) -> bool {
        !matches!(self, SelectionOrigin::Scroll)
    }
}

impl fmt::Display for SelectionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionOrigin::Click => write!(f, "click"),
            SelectionOrigin::Keyboard => write!(f, "keyboard"),
            SelectionOrigin::Scroll => write!(f, "scroll"),
            SelectionOrigin::Reload => write!(f, "reload"),
        }
    }
}

/// Keys understood by the card list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Left,
    Right,
    Home,
    End,
}

impl NavKey {
    /// Target index for this key, or `None` when the key would not move.
    pub fn target(self, current: usize, plan_count: usize) -> Option<usize> {
        if plan_count == 0 {
            return None;
        }
        let last = plan_count - 1;
        let current = current.min(last);
        let target = match self {
            NavKey::Left => current.saturating_sub(1),
            NavKey::Right => (current + 1).min(last),
            NavKey::Home => 0,
            NavKey::End => last,
        };
        (target != current).then_some(target)
    }
}

impl FromStr for NavKey {
    type Err = Error;

    /// Accepts DOM `KeyboardEvent.key` names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowLeft" | "Left" => Ok(NavKey::Left),
            "ArrowRight" | "Right" => Ok(NavKey::Right),
            "Home" => Ok(NavKey::Home),
            "End" => Ok(NavKey::End),
            other => Err(Error::UnknownKey(other.to_string())),
        }
    }
}

/// Snapshot of what the card list currently shows as selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub active_index: usize,
    pub billing: BillingPeriod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_key_bounds() {
        assert_eq!(NavKey::End.target(0, 4), Some(3));
        assert_eq!(NavKey::Home.target(3, 4), Some(0));
        assert_eq!(NavKey::Right.target(3, 4), None);
        assert_eq!(NavKey::Left.target(0, 4), None);
        assert_eq!(NavKey::Right.target(1, 4), Some(2));
        assert_eq!(NavKey::Left.target(2, 4), Some(1));
    }

    #[test]
    fn test_nav_key_on_empty_list_is_inert() {
        assert_eq!(NavKey::End.target(0, 0), None);
        assert_eq!(NavKey::Right.target(0, 0), None);
    }

    #[test]
    fn test_billing_period_rejects_unknown() {
        assert_eq!("yearly".parse::<BillingPeriod>(), Ok(BillingPeriod::Yearly));
        assert_eq!(
            "weekly".parse::<BillingPeriod>(),
            Err(Error::InvalidBillingPeriod("weekly".to_string()))
        );
    }

    #[test]
    fn test_origin_classification() {
        assert!(SelectionOrigin::Click.is_user_interactive());
        assert!(SelectionOrigin::Keyboard.is_user_interactive());
        assert!(!SelectionOrigin::Scroll.is_user_interactive());
        assert!(!SelectionOrigin::Reload.is_user_interactive());
        assert!(!SelectionOrigin::Scroll.scrolls_programmatically());
        assert!(SelectionOrigin::Reload.scrolls_programmatically());
    }
}
