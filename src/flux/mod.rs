//! Decorative animations with compile-time known variants
//!
//! All flux animations are stored in an enum to avoid boxing.
//! Each one implements [`Animation`] and is driven by the scheduler.

mod fire;
mod fireworks;
mod pulse;
mod snake;
mod sparkle;
mod spray;
mod wipe;

pub use fire::{DEFAULT_COOLING, DEFAULT_SPARKING, Fire, FireIce, fire_ice_color, heat_color};
pub use fireworks::{CRACKS, Fireworks};
pub use pulse::{DEFAULT_PULSE_RATIO, PulseColor};
pub use snake::{DEFAULT_MAX_SNAKES, KnightSnakes};
pub use sparkle::{DEFAULT_DENSITY, SparkleRgb, SparkleWhite};
pub use spray::{DEFAULT_DENSITY_RATIO, SprayColor, SprayOrigin};
pub use wipe::{ColorWipe, HsvColorWheel, TwoSineWipe, WheelColorTest};

use crate::{
    scheduler::{Animation, StepResult},
    strip::LedStrip,
};

const FLUX_NAME_COLOR_WIPE: &str = "color_wipe";
const FLUX_NAME_TWO_SINE_WIPE: &str = "two_sine_wipe";
const FLUX_NAME_WHEEL_COLOR_TEST: &str = "wheel_color_test";
const FLUX_NAME_HSV_COLOR_WHEEL: &str = "hsv_color_wheel";
const FLUX_NAME_SPARKLE_WHITE: &str = "sparkle_white";
const FLUX_NAME_SPARKLE_RGB: &str = "sparkle_rgb";
const FLUX_NAME_FIRE: &str = "fire";
const FLUX_NAME_FIRE_ICE: &str = "fire_ice";
const FLUX_NAME_SPRAY_COLOR: &str = "spray_color";
const FLUX_NAME_FIREWORKS: &str = "fireworks";
const FLUX_NAME_KNIGHT_SNAKES: &str = "knight_snakes";
const FLUX_NAME_PULSE_COLOR: &str = "pulse_color";

const FLUX_ID_COLOR_WIPE: u8 = 0;
const FLUX_ID_TWO_SINE_WIPE: u8 = 1;
const FLUX_ID_WHEEL_COLOR_TEST: u8 = 2;
const FLUX_ID_HSV_COLOR_WHEEL: u8 = 3;
const FLUX_ID_SPARKLE_WHITE: u8 = 4;
const FLUX_ID_SPARKLE_RGB: u8 = 5;
const FLUX_ID_FIRE: u8 = 6;
const FLUX_ID_FIRE_ICE: u8 = 7;
const FLUX_ID_SPRAY_COLOR: u8 = 8;
const FLUX_ID_FIREWORKS: u8 = 9;
const FLUX_ID_KNIGHT_SNAKES: u8 = 10;
const FLUX_ID_PULSE_COLOR: u8 = 11;

/// Known flux animation ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FluxId {
    ColorWipe = FLUX_ID_COLOR_WIPE,
    TwoSineWipe = FLUX_ID_TWO_SINE_WIPE,
    WheelColorTest = FLUX_ID_WHEEL_COLOR_TEST,
    HsvColorWheel = FLUX_ID_HSV_COLOR_WHEEL,
    SparkleWhite = FLUX_ID_SPARKLE_WHITE,
    SparkleRgb = FLUX_ID_SPARKLE_RGB,
    Fire = FLUX_ID_FIRE,
    FireIce = FLUX_ID_FIRE_ICE,
    SprayColor = FLUX_ID_SPRAY_COLOR,
    Fireworks = FLUX_ID_FIREWORKS,
    KnightSnakes = FLUX_ID_KNIGHT_SNAKES,
    PulseColor = FLUX_ID_PULSE_COLOR,
}

impl FluxId {
    pub const ALL: [Self; 12] = [
        Self::ColorWipe,
        Self::TwoSineWipe,
        Self::WheelColorTest,
        Self::HsvColorWheel,
        Self::SparkleWhite,
        Self::SparkleRgb,
        Self::Fire,
        Self::FireIce,
        Self::SprayColor,
        Self::Fireworks,
        Self::KnightSnakes,
        Self::PulseColor,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            FLUX_ID_COLOR_WIPE => Self::ColorWipe,
            FLUX_ID_TWO_SINE_WIPE => Self::TwoSineWipe,
            FLUX_ID_WHEEL_COLOR_TEST => Self::WheelColorTest,
            FLUX_ID_HSV_COLOR_WHEEL => Self::HsvColorWheel,
            FLUX_ID_SPARKLE_WHITE => Self::SparkleWhite,
            FLUX_ID_SPARKLE_RGB => Self::SparkleRgb,
            FLUX_ID_FIRE => Self::Fire,
            FLUX_ID_FIRE_ICE => Self::FireIce,
            FLUX_ID_SPRAY_COLOR => Self::SprayColor,
            FLUX_ID_FIREWORKS => Self::Fireworks,
            FLUX_ID_KNIGHT_SNAKES => Self::KnightSnakes,
            FLUX_ID_PULSE_COLOR => Self::PulseColor,
            _ => return None,
        })
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Build a fresh animation; `seed` feeds its random generators.
    pub fn to_slot(self, seed: u64) -> FluxSlot {
        match self {
            Self::ColorWipe => FluxSlot::ColorWipe(ColorWipe::default()),
            Self::TwoSineWipe => FluxSlot::TwoSineWipe(TwoSineWipe::default()),
            Self::WheelColorTest => FluxSlot::WheelColorTest(WheelColorTest::default()),
            Self::HsvColorWheel => FluxSlot::HsvColorWheel(HsvColorWheel::default()),
            Self::SparkleWhite => FluxSlot::SparkleWhite(SparkleWhite::new(seed)),
            Self::SparkleRgb => FluxSlot::SparkleRgb(SparkleRgb::new(seed)),
            Self::Fire => FluxSlot::Fire(Fire::new(seed)),
            Self::FireIce => FluxSlot::FireIce(FireIce::new(seed)),
            Self::SprayColor => FluxSlot::SprayColor(SprayColor::new(seed)),
            Self::Fireworks => FluxSlot::Fireworks(Fireworks::new(seed)),
            Self::KnightSnakes => FluxSlot::KnightSnakes(KnightSnakes::new(seed)),
            Self::PulseColor => FluxSlot::PulseColor(PulseColor::new(seed)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColorWipe => FLUX_NAME_COLOR_WIPE,
            Self::TwoSineWipe => FLUX_NAME_TWO_SINE_WIPE,
            Self::WheelColorTest => FLUX_NAME_WHEEL_COLOR_TEST,
            Self::HsvColorWheel => FLUX_NAME_HSV_COLOR_WHEEL,
            Self::SparkleWhite => FLUX_NAME_SPARKLE_WHITE,
            Self::SparkleRgb => FLUX_NAME_SPARKLE_RGB,
            Self::Fire => FLUX_NAME_FIRE,
            Self::FireIce => FLUX_NAME_FIRE_ICE,
            Self::SprayColor => FLUX_NAME_SPRAY_COLOR,
            Self::Fireworks => FLUX_NAME_FIREWORKS,
            Self::KnightSnakes => FLUX_NAME_KNIGHT_SNAKES,
            Self::PulseColor => FLUX_NAME_PULSE_COLOR,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            FLUX_NAME_COLOR_WIPE => Some(Self::ColorWipe),
            FLUX_NAME_TWO_SINE_WIPE => Some(Self::TwoSineWipe),
            FLUX_NAME_WHEEL_COLOR_TEST => Some(Self::WheelColorTest),
            FLUX_NAME_HSV_COLOR_WHEEL => Some(Self::HsvColorWheel),
            FLUX_NAME_SPARKLE_WHITE => Some(Self::SparkleWhite),
            FLUX_NAME_SPARKLE_RGB => Some(Self::SparkleRgb),
            FLUX_NAME_FIRE => Some(Self::Fire),
            FLUX_NAME_FIRE_ICE => Some(Self::FireIce),
            FLUX_NAME_SPRAY_COLOR => Some(Self::SprayColor),
            FLUX_NAME_FIREWORKS => Some(Self::Fireworks),
            FLUX_NAME_KNIGHT_SNAKES => Some(Self::KnightSnakes),
            FLUX_NAME_PULSE_COLOR => Some(Self::PulseColor),
            _ => None,
        }
    }
}

/// Flux slot - enum containing every decorative animation
#[derive(Debug, Clone)]
pub enum FluxSlot {
    ColorWipe(ColorWipe),
    TwoSineWipe(TwoSineWipe),
    WheelColorTest(WheelColorTest),
    HsvColorWheel(HsvColorWheel),
    SparkleWhite(SparkleWhite),
    SparkleRgb(SparkleRgb),
    Fire(Fire),
    FireIce(FireIce),
    SprayColor(SprayColor),
    Fireworks(Fireworks),
    KnightSnakes(KnightSnakes),
    PulseColor(PulseColor),
}

impl FluxSlot {
    /// Get the animation ID for external observation
    pub fn id(&self) -> FluxId {
        match self {
            Self::ColorWipe(_) => FluxId::ColorWipe,
            Self::TwoSineWipe(_) => FluxId::TwoSineWipe,
            Self::WheelColorTest(_) => FluxId::WheelColorTest,
            Self::HsvColorWheel(_) => FluxId::HsvColorWheel,
            Self::SparkleWhite(_) => FluxId::SparkleWhite,
            Self::SparkleRgb(_) => FluxId::SparkleRgb,
            Self::Fire(_) => FluxId::Fire,
            Self::FireIce(_) => FluxId::FireIce,
            Self::SprayColor(_) => FluxId::SprayColor,
            Self::Fireworks(_) => FluxId::Fireworks,
            Self::KnightSnakes(_) => FluxId::KnightSnakes,
            Self::PulseColor(_) => FluxId::PulseColor,
        }
    }
}

impl Animation for FluxSlot {
    fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult {
        match self {
            Self::ColorWipe(flux) => flux.step(strip, step),
            Self::TwoSineWipe(flux) => flux.step(strip, step),
            Self::WheelColorTest(flux) => flux.step(strip, step),
            Self::HsvColorWheel(flux) => flux.step(strip, step),
            Self::SparkleWhite(flux) => flux.step(strip, step),
            Self::SparkleRgb(flux) => flux.step(strip, step),
            Self::Fire(flux) => flux.step(strip, step),
            Self::FireIce(flux) => flux.step(strip, step),
            Self::SprayColor(flux) => flux.step(strip, step),
            Self::Fireworks(flux) => flux.step(strip, step),
            Self::KnightSnakes(flux) => flux.step(strip, step),
            Self::PulseColor(flux) => flux.step(strip, step),
        }
    }
}
