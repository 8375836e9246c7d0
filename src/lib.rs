#![no_std]

extern crate alloc;

pub mod algorithm;
pub mod array;
pub mod channel;
pub mod clock;
pub mod color;
pub mod control;
pub mod driver;
pub mod flux;
pub mod hooks;
pub mod item;
pub mod math8;
pub mod playlist;
pub mod scheduler;
pub mod sound;
pub mod strip;

pub use algorithm::{
    AlgorithmId, AlgorithmKind, RunConfig, run_algorithm, run_algorithm_with, run_hash, run_sat,
    run_sort,
};
pub use array::{AccessObserver, Interrupted, ItemArray, TooManyItems};
pub use clock::{Clock, SystemClock};
pub use control::{
    ControlChannel, ControlIntent, ControlProcessor, ControlReceiver, ControlSender,
};
pub use driver::{AnimationDriver, FlashIntensity, FlashPalette, HuePalette, Pacing, SatPalette};
pub use flux::{FluxId, FluxSlot};
pub use hooks::Hooks;
pub use item::{Access, Item, Operand, Value};
pub use playlist::{AlgorithmPlaylist, FluxPlaylist};
pub use scheduler::{Animation, RunOutcome, StepResult, Track, run_animation, run_animations};
pub use sound::{AccessQueue, SoundHooks};
pub use strip::{FrameBuffer, LedStrip, OutputDriver};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};
