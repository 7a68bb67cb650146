//! Gamepad input mapping
//!
//! The record reserves one byte per physical button. The byte holds the code
//! of the action bound to that button, or [`UNBOUND`]. An action is stored on
//! the button, so the mapping is kept in memory as action to button and
//! inverted on the way to disk.
//!
//! Two actions, `MenuAccept` and `MenuBack`, have no known code of their own
//! and both default to `0xFF`. [`ActionCodes`] makes that collision visible
//! through [`ActionCodes::collisions`] and lets callers assign real codes or
//! choose how a shared code decodes.

use crate::profile::error::{ProfileError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Slot value for a button with no action bound
pub const UNBOUND: u8 = 0x7F;

/// Logical gameplay command
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move forward
    MoveForward,
    /// Move backward
    MoveBackward,
    /// Strafe left
    MoveLeft,
    /// Strafe right
    MoveRight,
    /// Look up
    LookUp,
    /// Look down
    LookDown,
    /// Look left
    LookLeft,
    /// Look right
    LookRight,
    /// Fire weapon
    FireWeapon,
    /// Throw grenade
    ThrowGrenade,
    /// Cycle grenade type
    SwitchGrenade,
    /// Cycle weapon
    SwitchWeapon,
    /// Reload
    Reload,
    /// Melee
    MeleeAttack,
    /// Swap weapon with one on the ground
    ExchangeWeapon,
    /// Jump
    Jump,
    /// Crouch
    Crouch,
    /// Toggle flashlight
    Flashlight,
    /// Scope zoom
    ScopeZoom,
    /// Context action
    Action,
    /// Menu accept
    MenuAccept,
    /// Menu back
    MenuBack,
    /// Chat to all
    Say,
    /// Chat to team
    SayToTeam,
    /// Chat to vehicle
    SayToVehicle,
    /// Show scoreboard
    ShowScores,
    /// Show game rules
    ShowRules,
    /// Show player names
    ShowPlayerNames,
}

impl Action {
    /// Every action in declaration order
    pub const ALL: [Self; 28] = [
        Self::MoveForward,
        Self::MoveBackward,
        Self::MoveLeft,
        Self::MoveRight,
        Self::LookUp,
        Self::LookDown,
        Self::LookLeft,
        Self::LookRight,
        Self::FireWeapon,
        Self::ThrowGrenade,
        Self::SwitchGrenade,
        Self::SwitchWeapon,
        Self::Reload,
        Self::MeleeAttack,
        Self::ExchangeWeapon,
        Self::Jump,
        Self::Crouch,
        Self::Flashlight,
        Self::ScopeZoom,
        Self::Action,
        Self::MenuAccept,
        Self::MenuBack,
        Self::Say,
        Self::SayToTeam,
        Self::SayToVehicle,
        Self::ShowScores,
        Self::ShowRules,
        Self::ShowPlayerNames,
    ];

    /// Code written to a button slot, before any override
    pub const fn default_code(self) -> u8 {
        match self {
            Self::Jump => 0x00,
            Self::SwitchGrenade => 0x01,
            Self::Action => 0x02,
            Self::SwitchWeapon => 0x03,
            Self::MeleeAttack => 0x04,
            Self::Flashlight => 0x05,
            Self::ThrowGrenade => 0x06,
            Self::FireWeapon => 0x07,
            Self::Crouch => 0x0A,
            Self::ScopeZoom => 0x0B,
            Self::ShowScores => 0x0C,
            Self::Reload => 0x0D,
            Self::ExchangeWeapon => 0x0E,
            Self::Say => 0x0F,
            Self::SayToTeam => 0x10,
            Self::SayToVehicle => 0x11,
            Self::MoveForward => 0x13,
            Self::MoveBackward => 0x14,
            Self::MoveLeft => 0x15,
            Self::MoveRight => 0x16,
            Self::LookUp => 0x17,
            Self::LookDown => 0x18,
            Self::LookLeft => 0x19,
            Self::LookRight => 0x1A,
            Self::ShowRules => 0x1B,
            Self::ShowPlayerNames => 0x1C,
            Self::MenuAccept | Self::MenuBack => 0xFF,
        }
    }

    /// Look up an action by its name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| format!("{action:?}").eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Physical gamepad button, identified by its slot offset in the record
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Button {
    /// Face button A
    A = 0x22A,
    /// Face button B
    B = 0x22C,
    /// Face button X
    X = 0x22E,
    /// Face button Y
    Y = 0x230,
    /// Left bumper
    LB = 0x232,
    /// Right bumper
    RB = 0x234,
    /// Back
    Back = 0x236,
    /// Start
    Start = 0x238,
    /// Left stick click
    LSM = 0x23A,
    /// Right stick click
    RSM = 0x23C,
    /// Left stick down
    LSD = 0x33A,
    /// Left stick up
    LSU = 0x33C,
    /// Left stick right
    LSR = 0x33E,
    /// Left stick left
    LSL = 0x340,
    /// Right stick down
    RSD = 0x342,
    /// Right stick up
    RSU = 0x344,
    /// Right stick right
    RSR = 0x346,
    /// Right stick left
    RSL = 0x348,
    /// Left trigger
    LT = 0x34A,
    /// Right trigger
    RT = 0x34C,
    /// D-pad up
    DPU = 0x53A,
    /// D-pad right
    DPR = 0x53E,
    /// D-pad down
    DPD = 0x542,
    /// D-pad left
    DPL = 0x546,
}

impl Button {
    /// Every button slot in ascending offset order
    pub const ALL: [Self; 24] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::LB,
        Self::RB,
        Self::Back,
        Self::Start,
        Self::LSM,
        Self::RSM,
        Self::LSD,
        Self::LSU,
        Self::LSR,
        Self::LSL,
        Self::RSD,
        Self::RSU,
        Self::RSR,
        Self::RSL,
        Self::LT,
        Self::RT,
        Self::DPU,
        Self::DPR,
        Self::DPD,
        Self::DPL,
    ];

    /// Byte offset of this button's slot in the record
    pub const fn offset(self) -> u16 {
        self as u16
    }

    /// Find the button whose slot lives at `offset`
    pub fn from_offset(offset: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|button| button.offset() == offset)
    }

    /// Look up a button by its short name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|button| format!("{button:?}").eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What decoding does with a code shared by several actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CodeCollision {
    /// Decode as the first sharing action in declaration order
    #[default]
    PreferFirst,
    /// Fail with [`ProfileError::AmbiguousActionCode`]
    Reject,
}

/// Action to code table used in both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCodes {
    menu_accept: u8,
    menu_back: u8,
    collision: CodeCollision,
}

impl Default for ActionCodes {
    fn default() -> Self {
        Self {
            menu_accept: Action::MenuAccept.default_code(),
            menu_back: Action::MenuBack.default_code(),
            collision: CodeCollision::default(),
        }
    }
}

impl ActionCodes {
    /// Default table, including the shared menu code
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign codes to the two menu actions
    #[must_use]
    pub const fn with_menu_codes(mut self, accept: u8, back: u8) -> Self {
        self.menu_accept = accept;
        self.menu_back = back;
        self
    }

    /// Choose how shared codes decode
    #[must_use]
    pub const fn with_collision(mut self, collision: CodeCollision) -> Self {
        self.collision = collision;
        self
    }

    /// Policy for shared codes
    pub const fn collision(&self) -> CodeCollision {
        self.collision
    }

    /// Code written for `action`
    pub const fn code(&self, action: Action) -> u8 {
        match action {
            Action::MenuAccept => self.menu_accept,
            Action::MenuBack => self.menu_back,
            other => other.default_code(),
        }
    }

    /// Actions using `code`, in declaration order
    pub fn actions_for(&self, code: u8) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.code(action) == code)
            .collect()
    }

    /// Every code used by more than one action
    pub fn collisions(&self) -> BTreeMap<u8, Vec<Action>> {
        let mut by_code: BTreeMap<u8, Vec<Action>> = BTreeMap::new();
        for action in Action::ALL {
            by_code.entry(self.code(action)).or_default().push(action);
        }
        by_code.retain(|_, actions| actions.len() > 1);
        by_code
    }

    /// Resolve a slot byte to an action
    ///
    /// Returns `Ok(None)` for [`UNBOUND`] and for codes no action uses.
    pub fn decode(&self, code: u8) -> Result<Option<Action>> {
        if code == UNBOUND {
            return Ok(None);
        }

        let actions = self.actions_for(code);
        match actions.as_slice() {
            [] => Ok(None),
            [action] => Ok(Some(*action)),
            [first, ..] => {
                let first = *first;
                match self.collision {
                    CodeCollision::PreferFirst => {
                        warn!(
                            "Action code {code:#04x} is shared by {actions:?}, decoding as {first}"
                        );
                        Ok(Some(first))
                    }
                    CodeCollision::Reject => {
                        Err(ProfileError::AmbiguousActionCode { code, actions })
                    }
                }
            }
        }
    }
}

/// Action to button bindings
///
/// Each action is bound to at most one button and each button carries at
/// most one action, matching the one code per slot stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputMapping {
    bindings: BTreeMap<Action, Button>,
}

impl InputMapping {
    /// Empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `button`, returning the previous button
    ///
    /// Any other action already on `button` loses its binding.
    pub fn bind(&mut self, action: Action, button: Button) -> Option<Button> {
        self.bindings
            .retain(|&bound, &mut slot| bound == action || slot != button);
        self.bindings.insert(action, button)
    }

    /// Remove the binding for `action`
    pub fn unbind(&mut self, action: Action) -> Option<Button> {
        self.bindings.remove(&action)
    }

    /// Remove every binding
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Button bound to `action`
    pub fn get(&self, action: Action) -> Option<Button> {
        self.bindings.get(&action).copied()
    }

    /// Whether `action` has a binding
    pub fn contains(&self, action: Action) -> bool {
        self.bindings.contains_key(&action)
    }

    /// Actions bound to `button`
    pub fn actions_on(&self, button: Button) -> impl Iterator<Item = Action> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, bound)| **bound == button)
            .map(|(action, _)| *action)
    }

    /// Bindings in action order
    pub fn iter(&self) -> impl Iterator<Item = (Action, Button)> + '_ {
        self.bindings.iter().map(|(action, button)| (*action, *button))
    }

    /// Number of bound actions
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(Action, Button)> for InputMapping {
    fn from_iter<I: IntoIterator<Item = (Action, Button)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (action, button) in iter {
            mapping.bind(action, button);
        }
        mapping
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_sorted_by_offset() {
        let offsets: Vec<u16> = Button::ALL.iter().map(|b| b.offset()).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(offsets, sorted);
        assert_eq!(Button::ALL[0].offset(), 0x22A);
        assert_eq!(Button::ALL[23].offset(), 0x546);
    }

    #[test]
    fn test_button_lookup() {
        assert_eq!(Button::from_offset(0x34C), Some(Button::RT));
        assert_eq!(Button::from_offset(0x34D), None);
        assert_eq!(Button::from_name("dpl"), Some(Button::DPL));
    }

    #[test]
    fn test_default_codes_unique_except_menu() {
        let codes = ActionCodes::default();
        let collisions = codes.collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(
            collisions.get(&0xFF),
            Some(&vec![Action::MenuAccept, Action::MenuBack])
        );
        assert!(Action::ALL.iter().all(|a| a.default_code() != UNBOUND));
    }

    #[test]
    fn test_menu_codes_configurable() {
        let codes = ActionCodes::new().with_menu_codes(0x08, 0x09);
        assert!(codes.collisions().is_empty());
        assert_eq!(codes.code(Action::MenuAccept), 0x08);
        assert_eq!(codes.decode(0x09).unwrap(), Some(Action::MenuBack));
    }

    #[test]
    fn test_decode_shared_code() {
        let codes = ActionCodes::default();
        assert_eq!(codes.decode(0xFF).unwrap(), Some(Action::MenuAccept));

        let strict = codes.with_collision(CodeCollision::Reject);
        let err = strict.decode(0xFF).unwrap_err();
        assert!(matches!(err, ProfileError::AmbiguousActionCode { code: 0xFF, .. }));
    }

    #[test]
    fn test_decode_unbound_and_unknown() {
        let codes = ActionCodes::default();
        assert_eq!(codes.decode(UNBOUND).unwrap(), None);
        assert_eq!(codes.decode(0x12).unwrap(), None);
        assert_eq!(codes.decode(0x13).unwrap(), Some(Action::MoveForward));
    }

    #[test]
    fn test_mapping_operations() {
        let mut mapping = InputMapping::new();
        assert!(mapping.is_empty());
        assert_eq!(mapping.bind(Action::Jump, Button::A), None);
        assert_eq!(mapping.bind(Action::Jump, Button::B), Some(Button::A));
        mapping.bind(Action::Crouch, Button::X);

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(Action::Jump), Some(Button::B));
        let on_b: Vec<Action> = mapping.actions_on(Button::B).collect();
        assert_eq!(on_b, vec![Action::Jump]);

        assert_eq!(mapping.unbind(Action::Jump), Some(Button::B));
        assert!(!mapping.contains(Action::Jump));
        mapping.clear();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_bind_takes_over_button() {
        let mut mapping = InputMapping::new();
        mapping.bind(Action::Jump, Button::A);
        mapping.bind(Action::Reload, Button::X);
        assert_eq!(mapping.bind(Action::Crouch, Button::A), None);

        assert_eq!(mapping.get(Action::Jump), None);
        assert_eq!(mapping.get(Action::Crouch), Some(Button::A));
        assert_eq!(mapping.get(Action::Reload), Some(Button::X));
        let on_a: Vec<Action> = mapping.actions_on(Button::A).collect();
        assert_eq!(on_a, vec![Action::Crouch]);

        // Rebinding an action to its own button keeps it.
        mapping.bind(Action::Crouch, Button::A);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_collect_keeps_last_action_per_button() {
        let mapping: InputMapping = [
            (Action::Jump, Button::A),
            (Action::Crouch, Button::A),
            (Action::Reload, Button::B),
        ]
        .into_iter()
        .collect();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(Action::Crouch), Some(Button::A));
        assert!(!mapping.contains(Action::Jump));
    }
}
