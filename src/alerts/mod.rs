pub mod board;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

pub use board::{AlertBoard, VisibleAlert};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLifetime {
    /// Disappears on its own after the duration.
    Timed(Duration),
    /// Stays until an action removes it. `nominal` is advisory only.
    Sticky { nominal: Duration },
}

impl AlertLifetime {
    pub fn is_sticky(&self) -> bool {
        matches!(self, AlertLifetime::Sticky { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionEffect {
    View,
    Acknowledge,
    Dismiss,
}

/// Declarative description of a button embedded in an alert. The surface renders it and
/// reports the chosen effect back to whoever owns the alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertAction {
    pub id: &'static str,
    pub label: &'static str,
    pub effect: ActionEffect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertSpec {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub lifetime: AlertLifetime,
    pub actions: Vec<AlertAction>,
}

impl AlertSpec {
    pub fn timed(severity: Severity, summary: impl Into<String>, detail: impl Into<String>, life: Duration) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
            lifetime: AlertLifetime::Timed(life),
            actions: Vec::new(),
        }
    }

    pub fn sticky(severity: Severity, summary: impl Into<String>, detail: impl Into<String>, nominal: Duration) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
            lifetime: AlertLifetime::Sticky { nominal },
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: AlertAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn action(&self, id: &str) -> Option<&AlertAction> {
        self.actions.iter().find(|a| a.id == id)
    }
}

/// Identifies one shown alert. Every `show` mints a fresh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertHandle(Uuid);

impl AlertHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AlertHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlertHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Anything that can put alerts in front of the user.
///
/// `remove` must accept handles that are already gone; late async results routinely
/// try to remove alerts the user has closed or that timed out.
pub trait AlertSurface: Send + Sync {
    fn show(&self, spec: AlertSpec) -> AlertHandle;
    fn remove(&self, handle: AlertHandle);
}
