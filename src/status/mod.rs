//! Status controls: temporary listeners on control input.
//!
//! An ability that leaves something pending (a held fireball, a raised block)
//! gives its actor a status control. The control subscribes to one input and
//! runs when that input fires; once it reports completion the actor loses it.
//!
//! Descriptors live in a [`StatusControlRegistry`] built once at startup. Each
//! actor's held controls are an [`ActiveStatusControls`] set of ids.

mod active;

pub use active::ActiveStatusControls;

use crate::registry::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Id handed to the first registered status control.
pub const FIRST_STATUS_CONTROL_ID: u32 = 1;

/// Raytrace range meaning "the actor's reach".
pub const REACH_RANGE: i32 = -1;

/// Control input a status control can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    LeftClick,
    RightClick,
    RightClickDown,
    RightClickUp,
    MiddleClick,
    Jump,
    Shift,
}

/// Where the status icon is drawn relative to the crosshair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrosshairPosition {
    Above,
    LeftOf,
    RightOf,
    Below,
}

impl CrosshairPosition {
    /// Pixel offset `(x, y)` from the crosshair.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Self::Above => (4, 14),
            Self::LeftOf => (14, 3),
            Self::RightOf => (-6, 3),
            Self::Below => (4, -8),
        }
    }
}

/// Raytrace the host performs before executing a control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaytraceInfo {
    /// Blocks, or [`REACH_RANGE`]
    pub range: i32,
    pub raycast_liquids: bool,
}

impl RaytraceInfo {
    pub fn reach(raycast_liquids: bool) -> Self {
        Self {
            range: REACH_RANGE,
            raycast_liquids,
        }
    }

    pub fn uses_reach(&self) -> bool {
        self.range == REACH_RANGE
    }
}

/// Stable id of a status control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatusControlId(pub u32);

impl fmt::Display for StatusControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registration data for a status control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusControlDef {
    pub name: &'static str,
    /// Index into the 16x16 icon sheet
    pub texture: u32,
    pub control: Control,
    pub position: CrosshairPosition,
    pub raytrace: Option<RaytraceInfo>,
}

/// Registered status control.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusControl {
    pub id: StatusControlId,
    pub name: &'static str,
    pub texture: u32,
    pub control: Control,
    pub position: CrosshairPosition,
    pub raytrace: Option<RaytraceInfo>,
}

impl StatusControl {
    pub fn texture_u(&self) -> u32 {
        (self.texture * 16) % 256
    }

    pub fn texture_v(&self) -> u32 {
        (self.texture / 16) * 16
    }
}

/// Frozen table of status controls.
#[derive(Clone, Debug, Default)]
pub struct StatusControlRegistry {
    controls: Vec<StatusControl>,
}

/// Collects status control registrations.
#[derive(Debug, Default)]
pub struct StatusControlRegistryBuilder {
    controls: Vec<StatusControl>,
}

impl StatusControlRegistryBuilder {
    pub fn register(&mut self, def: StatusControlDef) -> Result<StatusControlId, BuildError> {
        if self.controls.iter().any(|control| control.name == def.name) {
            return Err(BuildError::DuplicateName(def.name.to_string()));
        }

        let id = StatusControlId(FIRST_STATUS_CONTROL_ID + self.controls.len() as u32);
        self.controls.push(StatusControl {
            id,
            name: def.name,
            texture: def.texture,
            control: def.control,
            position: def.position,
            raytrace: def.raytrace,
        });
        debug!(status_control = def.name, id = id.0, "registered status control");
        Ok(id)
    }

    pub fn with(mut self, def: StatusControlDef) -> Result<Self, BuildError> {
        self.register(def)?;
        Ok(self)
    }

    pub fn build(self) -> StatusControlRegistry {
        StatusControlRegistry {
            controls: self.controls,
        }
    }
}

/// Names of the stock controls, in registration order.
pub mod names {
    pub const AIR_JUMP: &str = "air_jump";
    pub const PLACE_BLOCK: &str = "place_block";
    pub const THROW_BLOCK: &str = "throw_block";
    pub const THROW_WATER: &str = "throw_water";
    pub const START_FLAMETHROW: &str = "start_flamethrow";
    pub const STOP_FLAMETHROW: &str = "stop_flamethrow";
    pub const THROW_FIRE: &str = "throw_fire";
    pub const THROW_BUBBLE: &str = "throw_bubble";
    pub const SKATING_JUMP: &str = "skating_jump";
    pub const SKATING_START: &str = "skating_start";
    pub const THROW_FIREBALL: &str = "throw_fireball";
    pub const BUBBLE_EXPAND: &str = "bubble_expand";
    pub const BUBBLE_CONTRACT: &str = "bubble_contract";
}

const fn def(
    name: &'static str,
    texture: u32,
    control: Control,
    position: CrosshairPosition,
    raytrace: Option<RaytraceInfo>,
) -> StatusControlDef {
    StatusControlDef {
        name,
        texture,
        control,
        position,
        raytrace,
    }
}

const REACH: Option<RaytraceInfo> = Some(RaytraceInfo {
    range: REACH_RANGE,
    raycast_liquids: false,
});

const STANDARD: [StatusControlDef; 13] = {
    use CrosshairPosition::*;
    use names::*;
    [
        def(AIR_JUMP, 0, Control::Jump, Above, None),
        def(PLACE_BLOCK, 1, Control::RightClick, RightOf, REACH),
        def(THROW_BLOCK, 2, Control::LeftClick, LeftOf, REACH),
        def(THROW_WATER, 4, Control::LeftClick, LeftOf, REACH),
        def(START_FLAMETHROW, 5, Control::RightClickDown, RightOf, None),
        def(STOP_FLAMETHROW, 5, Control::RightClickUp, RightOf, None),
        def(THROW_FIRE, 6, Control::LeftClick, LeftOf, REACH),
        def(THROW_BUBBLE, 7, Control::LeftClick, LeftOf, None),
        def(SKATING_JUMP, 8, Control::Jump, Above, None),
        def(SKATING_START, 9, Control::Shift, Below, None),
        def(THROW_FIREBALL, 10, Control::LeftClick, LeftOf, REACH),
        def(BUBBLE_EXPAND, 11, Control::RightClickDown, RightOf, None),
        def(BUBBLE_CONTRACT, 12, Control::Shift, Below, None),
    ]
};

impl StatusControlRegistry {
    pub fn builder() -> StatusControlRegistryBuilder {
        StatusControlRegistryBuilder::default()
    }

    /// Registry holding the stock controls.
    pub fn standard() -> Self {
        let mut builder = Self::builder();
        for entry in STANDARD {
            // Stock names are distinct.
            if let Err(err) = builder.register(entry) {
                debug!(%err, "skipped stock status control");
            }
        }
        builder.build()
    }

    /// Control registered under `id`; `None` for 0 or unknown ids.
    pub fn lookup(&self, id: StatusControlId) -> Option<&StatusControl> {
        let index = id.0.checked_sub(FIRST_STATUS_CONTROL_ID)?;
        self.controls.get(usize::try_from(index).ok()?)
    }

    pub fn by_name(&self, name: &str) -> Option<&StatusControl> {
        self.controls.iter().find(|control| control.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusControl> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}
