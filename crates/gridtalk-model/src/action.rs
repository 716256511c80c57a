//! Button activation behavior as a closed sum type.
//!
//! The persisted representation tags each action with a `type` field
//! (`{"type": "speak", "text": "hello"}`), which is exactly how boards are
//! stored. Switching an action's kind goes through [`Action::retarget`] so
//! no field of the previous variant can survive the switch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::PageId;

/// What happens when a button is activated in preview mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Utter text via the external speech collaborator.
    #[serde(rename_all = "camelCase")]
    Speak { text: String },
    /// Pop the navigation history.
    Back,
    /// Jump to the board's home page (the first page in board order).
    Home,
    /// Jump to a specific page. `None` means "not configured" and the
    /// button is inert in preview.
    #[serde(rename_all = "camelCase")]
    Link {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to_page_id: Option<PageId>,
    },
    /// Open a video overlay.
    #[serde(rename_all = "camelCase")]
    Youtube { video_id: String, title: String },
    /// Reserved marker with no behavior yet.
    Bookmark,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Speak { .. } => ActionKind::Speak,
            Action::Back => ActionKind::Back,
            Action::Home => ActionKind::Home,
            Action::Link { .. } => ActionKind::Link,
            Action::Youtube { .. } => ActionKind::Youtube,
            Action::Bookmark => ActionKind::Bookmark,
        }
    }

    /// Fresh default payload for a kind. `label` seeds the spoken text of a
    /// new `Speak` action.
    pub fn default_for(kind: ActionKind, label: &str) -> Action {
        match kind {
            ActionKind::Speak => Action::Speak {
                text: label.to_string(),
            },
            ActionKind::Back => Action::Back,
            ActionKind::Home => Action::Home,
            ActionKind::Link => Action::Link { to_page_id: None },
            ActionKind::Youtube => Action::Youtube {
                video_id: String::new(),
                title: String::new(),
            },
            ActionKind::Bookmark => Action::Bookmark,
        }
    }

    /// Reconstruct the action for a (possibly) new kind.
    ///
    /// When the kind already matches, the action is returned unchanged; when
    /// it differs, a fresh default variant is built so no field of the old
    /// variant carries over (switching `Youtube` to `Speak` must not leave a
    /// stale video id anywhere).
    pub fn retarget(self, kind: ActionKind, label: &str) -> Action {
        if self.kind() == kind {
            self
        } else {
            Action::default_for(kind, label)
        }
    }
}

/// Fieldless discriminant of [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Speak,
    Back,
    Home,
    Link,
    Youtube,
    Bookmark,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Speak => "speak",
            ActionKind::Back => "back",
            ActionKind::Home => "home",
            ActionKind::Link => "link",
            ActionKind::Youtube => "youtube",
            ActionKind::Bookmark => "bookmark",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "speak" => Ok(ActionKind::Speak),
            "back" => Ok(ActionKind::Back),
            "home" => Ok(ActionKind::Home),
            "link" => Ok(ActionKind::Link),
            "youtube" => Ok(ActionKind::Youtube),
            "bookmark" => Ok(ActionKind::Bookmark),
            _ => Err(format!("Unknown action kind: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retarget_to_same_kind_keeps_payload() {
        let action = Action::Speak {
            text: "hello".to_string(),
        };
        let same = action.clone().retarget(ActionKind::Speak, "label");
        assert_eq!(same, action);
    }

    #[test]
    fn retarget_across_kinds_drops_old_fields() {
        let action = Action::Youtube {
            video_id: "x".to_string(),
            title: "y".to_string(),
        };
        let speak = action.retarget(ActionKind::Speak, "yes");
        assert_eq!(
            speak,
            Action::Speak {
                text: "yes".to_string()
            }
        );
        let json = serde_json::to_value(&speak).unwrap();
        assert!(json.get("videoId").is_none());
    }

    #[test]
    fn retarget_to_link_starts_unconfigured() {
        let action = Action::Speak {
            text: "go".to_string(),
        };
        assert_eq!(
            action.retarget(ActionKind::Link, "go"),
            Action::Link { to_page_id: None }
        );
    }

    #[test]
    fn actions_serialize_with_type_tag() {
        let json = serde_json::to_value(Action::Speak {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "speak");
        assert_eq!(json["text"], "hi");

        let json = serde_json::to_value(Action::Back).unwrap();
        assert_eq!(json["type"], "back");
    }

    #[test]
    fn action_kind_round_trips_from_str() {
        assert_eq!("Youtube".parse::<ActionKind>().unwrap(), ActionKind::Youtube);
        assert_eq!(" back ".parse::<ActionKind>().unwrap(), ActionKind::Back);
        assert!("teleport".parse::<ActionKind>().is_err());
    }
}
