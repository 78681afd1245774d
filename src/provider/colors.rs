//! Priority color roles and their resolution to ARGB values.

use anyhow::{bail, Result};
use std::fmt;

/// Abstract color role assigned to a task importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityColor {
    Red,
    Amber,
    Blue,
    Grey,
}

impl PriorityColor {
    /// `<= 0` is red, `1` amber, `2` blue, anything higher grey.
    pub fn for_priority(priority: i32) -> Self {
        match priority {
            p if p <= 0 => PriorityColor::Red,
            1 => PriorityColor::Amber,
            2 => PriorityColor::Blue,
            _ => PriorityColor::Grey,
        }
    }
}

/// Packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argb(pub u32);

impl Argb {
    /// The same bits as a signed platform color int.
    pub fn as_color_int(self) -> i32 {
        self.0 as i32
    }

    /// Parses `#RRGGBB` (opaque) or `#AARRGGBB`.
    pub fn parse(s: &str) -> Result<Self> {
        let hex = match s.strip_prefix('#') {
            Some(hex) => hex,
            None => bail!("color '{}' must start with '#'", s),
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("color '{}' is not #RRGGBB or #AARRGGBB", s);
        }
        let value = match u32::from_str_radix(hex, 16) {
            Ok(v) if hex.len() == 6 => 0xFF00_0000 | v,
            Ok(v) if hex.len() == 8 => v,
            _ => bail!("color '{}' is not #RRGGBB or #AARRGGBB", s),
        };
        Ok(Argb(value))
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

pub trait ColorResolver: Send + Sync {
    fn resolve(&self, role: PriorityColor) -> Argb;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub red: Argb,
    pub amber: Argb,
    pub blue: Argb,
    pub grey: Argb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            red: Argb(0xFFF4_4336),
            amber: Argb(0xFFFF_C107),
            blue: Argb(0xFF21_96F3),
            grey: Argb(0xFF9E_9E9E),
        }
    }
}

impl ColorResolver for Palette {
    fn resolve(&self, role: PriorityColor) -> Argb {
        match role {
            PriorityColor::Red => self.red,
            PriorityColor::Amber => self.amber,
            PriorityColor::Blue => self.blue,
            PriorityColor::Grey => self.grey,
        }
    }
}
