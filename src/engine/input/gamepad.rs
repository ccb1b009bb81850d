// Gamepad layouts: hardware index remapping, modifiers and dead zone

use super::definition::{GamepadMapDef, GamepadMapEntryDef, GamepadModifier, GamepadType};
use super::keys::GamepadInput;
use super::InputError;
use crate::engine::hid::{GamepadPacket, MAX_GAMEPAD_AXIS_COUNT, MAX_GAMEPAD_BUTTON_COUNT};
use glam::Vec2;

/// Where one logical gamepad input lives on a particular controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadMapping {
    /// Hardware axis or button index in the gamepad packet
    pub index: u16,
    pub kind: GamepadType,
    pub negate: bool,
    pub scale: bool,
    pub clamp: bool,
}

impl GamepadMapping {
    /// Build a mapping from a definition entry, combining all its modifiers
    pub fn from_entry(device: &str, entry: &GamepadMapEntryDef) -> Result<Self, InputError> {
        let capacity = match entry.kind {
            GamepadType::Axis => MAX_GAMEPAD_AXIS_COUNT,
            GamepadType::Button => MAX_GAMEPAD_BUTTON_COUNT,
        };
        if entry.index as usize >= capacity {
            return Err(InputError::InvalidGamepadIndex {
                device: device.to_string(),
                index: entry.index,
            });
        }

        let mut mapping = Self {
            index: entry.index as u16,
            kind: entry.kind,
            negate: false,
            scale: false,
            clamp: false,
        };
        for modifier in &entry.modifiers {
            match modifier {
                GamepadModifier::Clamp => mapping.clamp = true,
                GamepadModifier::Negate => mapping.negate = true,
                GamepadModifier::Scale => mapping.scale = true,
            }
        }
        Ok(mapping)
    }

    /// Read the raw sample and run it through negate, scale and clamp, in that order
    pub fn apply(&self, packet: &GamepadPacket) -> f32 {
        match self.kind {
            GamepadType::Axis => {
                let mut v = packet.axis(self.index as usize);
                if self.negate {
                    v = -v;
                }
                if self.scale {
                    v = (v + 1.0) * 0.5;
                }
                if self.clamp {
                    v = v.clamp(0.0, 1.0);
                }
                v
            }
            GamepadType::Button => {
                if packet.button(self.index as usize) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    fn axis_index(&self) -> Option<usize> {
        match self.kind {
            GamepadType::Axis => Some(self.index as usize),
            GamepadType::Button => None,
        }
    }
}

/// Layout of one controller model on the running platform
#[derive(Debug, Clone, PartialEq)]
pub struct GamepadConfig {
    /// Radius around stick center treated as no input
    pub dead_zone: f32,

    inputs: [Option<GamepadMapping>; GamepadInput::COUNT],
}

impl GamepadConfig {
    /// Create a layout with nothing mapped
    pub fn new(dead_zone: f32) -> Self {
        Self {
            dead_zone,
            inputs: [None; GamepadInput::COUNT],
        }
    }

    /// Build a layout from a gamepad map definition
    ///
    /// Entries pointing outside the packet are skipped with a warning, the
    /// rest of the layout is kept.
    pub fn from_def(def: &GamepadMapDef) -> Self {
        let mut config = Self::new(def.dead_zone);
        for entry in &def.map {
            match GamepadMapping::from_entry(&def.device, entry) {
                Ok(mapping) => config.set(entry.input, mapping),
                Err(err) => log::warn!("{}, mapping for {:?} ignored", err, entry.input),
            }
        }
        config
    }

    /// Map a logical input, replacing any earlier mapping
    pub fn set(&mut self, input: GamepadInput, mapping: GamepadMapping) {
        self.inputs[input as usize] = Some(mapping);
    }

    /// Mapping for a logical input, `None` if this controller lacks it
    pub fn mapping(&self, input: GamepadInput) -> Option<&GamepadMapping> {
        self.inputs[input as usize].as_ref()
    }

    /// Zero both axes of each stick whose deflection is inside the dead zone
    ///
    /// Sticks are filtered independently. A stick is only filtered when both
    /// its axes are mapped to hardware axes.
    pub fn apply_dead_zone(&self, packet: &mut GamepadPacket) {
        let sticks = [
            (GamepadInput::LstickLeft, GamepadInput::LstickUp),
            (GamepadInput::RstickLeft, GamepadInput::RstickUp),
        ];
        let radius_sq = self.dead_zone * self.dead_zone;

        for (horizontal, vertical) in sticks {
            let x_axis = self.mapping(horizontal).and_then(GamepadMapping::axis_index);
            let y_axis = self.mapping(vertical).and_then(GamepadMapping::axis_index);
            if let (Some(x_axis), Some(y_axis)) = (x_axis, y_axis) {
                let stick = Vec2::new(packet.axis(x_axis), packet.axis(y_axis));
                if stick.length_squared() <= radius_sq {
                    packet.set_axis(x_axis, 0.0);
                    packet.set_axis(y_axis, 0.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn axis(index: u16) -> GamepadMapping {
        GamepadMapping {
            index,
            kind: GamepadType::Axis,
            negate: false,
            scale: false,
            clamp: false,
        }
    }

    fn entry(input: GamepadInput, index: u32, modifiers: &[GamepadModifier]) -> GamepadMapEntryDef {
        GamepadMapEntryDef {
            input,
            kind: GamepadType::Axis,
            index,
            modifiers: modifiers.to_vec(),
        }
    }

    fn stick_config(dead_zone: f32) -> GamepadConfig {
        let mut config = GamepadConfig::new(dead_zone);
        config.set(GamepadInput::LstickLeft, axis(0));
        config.set(GamepadInput::LstickUp, axis(1));
        config.set(GamepadInput::RstickLeft, axis(2));
        config.set(GamepadInput::RstickUp, axis(3));
        config
    }

    #[test]
    fn test_modifiers_combine() {
        let mapping = GamepadMapping::from_entry(
            "pad",
            &entry(
                GamepadInput::Ltrigger,
                4,
                &[GamepadModifier::Negate, GamepadModifier::Scale, GamepadModifier::Clamp],
            ),
        )
        .unwrap();
        assert!(mapping.negate);
        assert!(mapping.scale);
        assert!(mapping.clamp);
        assert_eq!(mapping.index, 4);
    }

    #[test]
    fn test_negate_applies_before_scale() {
        let mut mapping = axis(0);
        mapping.negate = true;
        mapping.scale = true;

        let mut packet = GamepadPacket::default();
        packet.set_axis(0, 0.5);

        // ((-0.5) + 1) / 2, not -((0.5 + 1) / 2)
        assert_relative_eq!(mapping.apply(&packet), 0.25);
    }

    #[test]
    fn test_clamp_applies_last() {
        let mut mapping = axis(0);
        mapping.negate = true;
        mapping.clamp = true;

        let mut packet = GamepadPacket::default();
        packet.set_axis(0, 0.75);
        assert_relative_eq!(mapping.apply(&packet), 0.0);

        packet.set_axis(0, -0.75);
        assert_relative_eq!(mapping.apply(&packet), 0.75);
    }

    #[test]
    fn test_button_ignores_modifiers() {
        let mapping = GamepadMapping {
            index: 3,
            kind: GamepadType::Button,
            negate: true,
            scale: true,
            clamp: false,
        };
        let mut packet = GamepadPacket::default();
        assert_eq!(mapping.apply(&packet), 0.0);

        packet.set_button(3, true);
        assert_eq!(mapping.apply(&packet), 1.0);
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let result = GamepadMapping::from_entry(
            "pad",
            &entry(GamepadInput::Ltrigger, MAX_GAMEPAD_AXIS_COUNT as u32, &[]),
        );
        assert!(matches!(
            result,
            Err(InputError::InvalidGamepadIndex { index, .. }) if index == MAX_GAMEPAD_AXIS_COUNT as u32
        ));
    }

    #[test]
    fn test_from_def_skips_invalid_entries() {
        let def = GamepadMapDef {
            device: "pad".to_string(),
            platform: "linux".to_string(),
            dead_zone: 0.2,
            map: vec![
                entry(GamepadInput::LstickLeft, 0, &[]),
                entry(GamepadInput::LstickUp, 99, &[]),
            ],
        };
        let config = GamepadConfig::from_def(&def);
        assert_relative_eq!(config.dead_zone, 0.2);
        assert!(config.mapping(GamepadInput::LstickLeft).is_some());
        assert!(config.mapping(GamepadInput::LstickUp).is_none());
        assert!(config.mapping(GamepadInput::Start).is_none());
    }

    #[test]
    fn test_dead_zone_zeroes_inside() {
        let config = stick_config(0.5);
        let mut packet = GamepadPacket::default();
        packet.set_axis(0, 0.5); // exactly on the radius
        packet.set_axis(1, 0.0);

        config.apply_dead_zone(&mut packet);
        assert_eq!(packet.axis(0), 0.0);
        assert_eq!(packet.axis(1), 0.0);
    }

    #[test]
    fn test_dead_zone_keeps_outside() {
        let config = stick_config(0.5);
        let mut packet = GamepadPacket::default();
        packet.set_axis(0, 0.5);
        packet.set_axis(1, 0.125);

        config.apply_dead_zone(&mut packet);
        assert_eq!(packet.axis(0), 0.5);
        assert_eq!(packet.axis(1), 0.125);
    }

    #[test]
    fn test_dead_zone_per_stick() {
        let config = stick_config(0.2);
        let mut packet = GamepadPacket::default();
        packet.set_axis(0, 0.1);
        packet.set_axis(1, 0.1);
        packet.set_axis(2, 0.9);
        packet.set_axis(3, 0.0);

        config.apply_dead_zone(&mut packet);
        assert_eq!(packet.axis(0), 0.0);
        assert_eq!(packet.axis(1), 0.0);
        assert_eq!(packet.axis(2), 0.9);
    }

    #[test]
    fn test_dead_zone_needs_both_axes() {
        let mut config = GamepadConfig::new(0.5);
        config.set(GamepadInput::LstickLeft, axis(0));

        let mut packet = GamepadPacket::default();
        packet.set_axis(0, 0.1);
        config.apply_dead_zone(&mut packet);
        assert_eq!(packet.axis(0), 0.1);
    }
}
