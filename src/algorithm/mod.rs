//! Algorithm catalogue and runners.
//!
//! Algorithms never see a strip. A runner builds an
//! [`AnimationDriver`] around the strip, installs it as the observer of a
//! fresh [`ItemArray`] and hands the array to the algorithm.

pub mod hash;
pub mod sat;
pub mod sort;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    array::{AccessObserver, Interrupted, ItemArray, TooManyItems},
    clock::Clock,
    driver::{AnimationDriver, FlashIntensity, FlashPalette, HuePalette, Pacing, SatPalette},
    hooks::Hooks,
    scheduler::RunOutcome,
    strip::LedStrip,
};

const ALGORITHM_NAME_SELECTION: &str = "selection";
const ALGORITHM_NAME_INSERTION: &str = "insertion";
const ALGORITHM_NAME_BUBBLE: &str = "bubble";
const ALGORITHM_NAME_COCKTAIL_SHAKER: &str = "cocktail_shaker";
const ALGORITHM_NAME_QUICK_SORT_LR: &str = "quick_sort_lr";
const ALGORITHM_NAME_QUICK_SORT_LL: &str = "quick_sort_ll";
const ALGORITHM_NAME_QUICK_SORT_DUAL_PIVOT: &str = "quick_sort_dual_pivot";
const ALGORITHM_NAME_MERGE: &str = "merge";
const ALGORITHM_NAME_MERGE_ITERATIVE: &str = "merge_iterative";
const ALGORITHM_NAME_SHELL: &str = "shell";
const ALGORITHM_NAME_HEAP: &str = "heap";
const ALGORITHM_NAME_CYCLE: &str = "cycle";
const ALGORITHM_NAME_RADIX_MSD: &str = "radix_msd";
const ALGORITHM_NAME_RADIX_LSD: &str = "radix_lsd";
const ALGORITHM_NAME_BOZO: &str = "bozo";
const ALGORITHM_NAME_LINEAR_PROBING: &str = "linear_probing";
const ALGORITHM_NAME_QUADRATIC_PROBING: &str = "quadratic_probing";
const ALGORITHM_NAME_CUCKOO_TWO: &str = "cuckoo_two";
const ALGORITHM_NAME_CUCKOO_THREE: &str = "cuckoo_three";
const ALGORITHM_NAME_LAWA_SAT: &str = "lawa_sat";

const ALGORITHM_ID_SELECTION: u8 = 0;
const ALGORITHM_ID_INSERTION: u8 = 1;
const ALGORITHM_ID_BUBBLE: u8 = 2;
const ALGORITHM_ID_COCKTAIL_SHAKER: u8 = 3;
const ALGORITHM_ID_QUICK_SORT_LR: u8 = 4;
const ALGORITHM_ID_QUICK_SORT_LL: u8 = 5;
const ALGORITHM_ID_QUICK_SORT_DUAL_PIVOT: u8 = 6;
const ALGORITHM_ID_MERGE: u8 = 7;
const ALGORITHM_ID_MERGE_ITERATIVE: u8 = 8;
const ALGORITHM_ID_SHELL: u8 = 9;
const ALGORITHM_ID_HEAP: u8 = 10;
const ALGORITHM_ID_CYCLE: u8 = 11;
const ALGORITHM_ID_RADIX_MSD: u8 = 12;
const ALGORITHM_ID_RADIX_LSD: u8 = 13;
const ALGORITHM_ID_BOZO: u8 = 14;
const ALGORITHM_ID_LINEAR_PROBING: u8 = 15;
const ALGORITHM_ID_QUADRATIC_PROBING: u8 = 16;
const ALGORITHM_ID_CUCKOO_TWO: u8 = 17;
const ALGORITHM_ID_CUCKOO_THREE: u8 = 18;
const ALGORITHM_ID_LAWA_SAT: u8 = 19;

/// Per-access delay of the SAT search, in microseconds
const SAT_DELAY_TIME: i32 = 100;

/// What an algorithm does to its array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// Sorts a random permutation
    Sort,
    /// Inserts keys into an empty table
    Hash,
    /// Local search on a random formula
    Sat,
}

/// Known algorithms that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AlgorithmId {
    Selection = ALGORITHM_ID_SELECTION,
    Insertion = ALGORITHM_ID_INSERTION,
    Bubble = ALGORITHM_ID_BUBBLE,
    CocktailShaker = ALGORITHM_ID_COCKTAIL_SHAKER,
    QuickSortLr = ALGORITHM_ID_QUICK_SORT_LR,
    QuickSortLl = ALGORITHM_ID_QUICK_SORT_LL,
    QuickSortDualPivot = ALGORITHM_ID_QUICK_SORT_DUAL_PIVOT,
    Merge = ALGORITHM_ID_MERGE,
    MergeIterative = ALGORITHM_ID_MERGE_ITERATIVE,
    Shell = ALGORITHM_ID_SHELL,
    Heap = ALGORITHM_ID_HEAP,
    Cycle = ALGORITHM_ID_CYCLE,
    RadixMsd = ALGORITHM_ID_RADIX_MSD,
    RadixLsd = ALGORITHM_ID_RADIX_LSD,
    Bozo = ALGORITHM_ID_BOZO,
    LinearProbing = ALGORITHM_ID_LINEAR_PROBING,
    QuadraticProbing = ALGORITHM_ID_QUADRATIC_PROBING,
    CuckooTwo = ALGORITHM_ID_CUCKOO_TWO,
    CuckooThree = ALGORITHM_ID_CUCKOO_THREE,
    LawaSat = ALGORITHM_ID_LAWA_SAT,
}

impl AlgorithmId {
    /// Playlist order
    pub const ALL: [Self; 20] = [
        Self::Selection,
        Self::Insertion,
        Self::Bubble,
        Self::CocktailShaker,
        Self::QuickSortLr,
        Self::QuickSortLl,
        Self::QuickSortDualPivot,
        Self::Merge,
        Self::MergeIterative,
        Self::Shell,
        Self::Heap,
        Self::Cycle,
        Self::RadixMsd,
        Self::RadixLsd,
        Self::Bozo,
        Self::LinearProbing,
        Self::QuadraticProbing,
        Self::CuckooTwo,
        Self::CuckooThree,
        Self::LawaSat,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// The entry after this one, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(usize::from(self.raw()) + 1) % Self::ALL.len()]
    }

    pub const fn kind(self) -> AlgorithmKind {
        match self {
            Self::LinearProbing
            | Self::QuadraticProbing
            | Self::CuckooTwo
            | Self::CuckooThree => AlgorithmKind::Hash,
            Self::LawaSat => AlgorithmKind::Sat,
            _ => AlgorithmKind::Sort,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Selection => ALGORITHM_NAME_SELECTION,
            Self::Insertion => ALGORITHM_NAME_INSERTION,
            Self::Bubble => ALGORITHM_NAME_BUBBLE,
            Self::CocktailShaker => ALGORITHM_NAME_COCKTAIL_SHAKER,
            Self::QuickSortLr => ALGORITHM_NAME_QUICK_SORT_LR,
            Self::QuickSortLl => ALGORITHM_NAME_QUICK_SORT_LL,
            Self::QuickSortDualPivot => ALGORITHM_NAME_QUICK_SORT_DUAL_PIVOT,
            Self::Merge => ALGORITHM_NAME_MERGE,
            Self::MergeIterative => ALGORITHM_NAME_MERGE_ITERATIVE,
            Self::Shell => ALGORITHM_NAME_SHELL,
            Self::Heap => ALGORITHM_NAME_HEAP,
            Self::Cycle => ALGORITHM_NAME_CYCLE,
            Self::RadixMsd => ALGORITHM_NAME_RADIX_MSD,
            Self::RadixLsd => ALGORITHM_NAME_RADIX_LSD,
            Self::Bozo => ALGORITHM_NAME_BOZO,
            Self::LinearProbing => ALGORITHM_NAME_LINEAR_PROBING,
            Self::QuadraticProbing => ALGORITHM_NAME_QUADRATIC_PROBING,
            Self::CuckooTwo => ALGORITHM_NAME_CUCKOO_TWO,
            Self::CuckooThree => ALGORITHM_NAME_CUCKOO_THREE,
            Self::LawaSat => ALGORITHM_NAME_LAWA_SAT,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Human readable name, reported through [`Hooks::on_algorithm`]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Bubble => "Bubble Sort",
            Self::CocktailShaker => "Cocktail-Shaker Sort",
            Self::QuickSortLr => "QuickSort (LR) Hoare",
            Self::QuickSortLl => "QuickSort (LL) Lomuto",
            Self::QuickSortDualPivot => "QuickSort Dual Pivot",
            Self::Merge => "MergeSort",
            Self::MergeIterative => "MergeSort Bottom-Up",
            Self::Shell => "ShellSort",
            Self::Heap => "HeapSort",
            Self::Cycle => "CycleSort",
            Self::RadixMsd => "RadixSort-MSD (High First)",
            Self::RadixLsd => "RadixSort-LSD (Low First)",
            Self::Bozo => "BozoSort",
            Self::LinearProbing => "Linear Probe Hash Table",
            Self::QuadraticProbing => "Quadratic Probe Hash Table",
            Self::CuckooTwo => "Cuckoo Two Hash Table",
            Self::CuckooThree => "Cuckoo Three Hash Table",
            Self::LawaSat => "SAT Solver Lazy Walk",
        }
    }

    /// Tuned pacing in the signed shorthand of [`Pacing::from_delay_time`].
    ///
    /// The values were picked for strips of a few hundred pixels and are
    /// only a starting point for other setups.
    pub const fn default_delay_time(self) -> i32 {
        match self {
            Self::Selection => -44,
            Self::Insertion => -40,
            Self::Bubble => -60,
            Self::CocktailShaker => -50,
            Self::QuickSortLr | Self::QuickSortLl | Self::Heap => -6,
            Self::QuickSortDualPivot | Self::RadixMsd | Self::Bozo => -4,
            Self::Merge | Self::MergeIterative => -2,
            Self::Shell => -3,
            Self::Cycle => 16_000,
            Self::RadixLsd => -1,
            Self::LinearProbing => 0,
            Self::QuadraticProbing => 4_000,
            Self::CuckooTwo => 12_000,
            Self::CuckooThree => 6_000,
            Self::LawaSat => SAT_DELAY_TIME,
        }
    }

    pub const fn default_pacing(self) -> Pacing {
        Pacing::from_delay_time(self.default_delay_time())
    }

    /// Run the algorithm on an already prepared array
    pub fn apply<O: AccessObserver>(self, a: &mut ItemArray<O>) -> Result<(), Interrupted> {
        match self {
            Self::Selection => sort::selection_sort(a),
            Self::Insertion => sort::insertion_sort(a),
            Self::Bubble => sort::bubble_sort(a),
            Self::CocktailShaker => sort::cocktail_shaker_sort(a),
            Self::QuickSortLr => sort::quick_sort_lr(a),
            Self::QuickSortLl => sort::quick_sort_ll(a),
            Self::QuickSortDualPivot => sort::quick_sort_dual_pivot(a),
            Self::Merge => sort::merge_sort(a),
            Self::MergeIterative => sort::merge_sort_iterative(a),
            Self::Shell => sort::shell_sort(a),
            Self::Heap => sort::heap_sort(a),
            Self::Cycle => sort::cycle_sort(a),
            Self::RadixMsd => sort::radix_sort_msd(a),
            Self::RadixLsd => sort::radix_sort_lsd(a),
            Self::Bozo => sort::bozo_sort(a),
            Self::LinearProbing => hash::linear_probing(a).map(drop),
            Self::QuadraticProbing => hash::quadratic_probing(a).map(drop),
            Self::CuckooTwo => hash::cuckoo_two(a).map(drop),
            Self::CuckooThree => hash::cuckoo_three(a).map(drop),
            Self::LawaSat => sat::lawa_sat(a).map(drop),
        }
    }
}

/// Settings shared by all runners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub pacing: Pacing,
    pub flash: FlashIntensity,
    /// Seed of the array's random source
    pub seed: u64,
}

impl RunConfig {
    pub const fn new(pacing: Pacing, seed: u64) -> Self {
        Self {
            pacing,
            flash: FlashIntensity::DEFAULT,
            seed,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(Pacing::default(), 0)
    }
}

/// Array observed by a runner's driver
pub type DrivenArray<S, P, C, H> = ItemArray<AnimationDriver<S, P, C, H>>;

/// Report the final count and settle every pending flash
fn finish<S: LedStrip, P: FlashPalette, C: Clock, H: Hooks>(array: &mut DrivenArray<S, P, C, H>) {
    let comparisons = array.comparisons();
    let (cells, driver) = array.parts_mut();
    driver.hooks_mut().on_comparison_count(comparisons);
    driver.pflush(cells);
}

/// Shuffle, sort, blank out misplaced cells and flush.
///
/// `sort` is any routine over the driven array, usually
/// [`AlgorithmId::apply`].
pub fn run_sort<S, C, H, F>(
    strip: S,
    clock: C,
    mut hooks: H,
    name: &str,
    config: &RunConfig,
    sort: F,
) -> Result<RunOutcome, TooManyItems>
where
    S: LedStrip,
    C: Clock,
    H: Hooks,
    F: FnOnce(&mut DrivenArray<S, HuePalette, C, H>) -> Result<(), Interrupted>,
{
    hooks.on_algorithm(name);
    let len = strip.size();
    #[cfg(feature = "esp32-log")]
    let start = clock.now();

    let palette = HuePalette::new(config.flash);
    let driver = AnimationDriver::new(strip, palette, clock, hooks, config.pacing);
    let mut array = ItemArray::new(len, driver, config.seed)?;

    array.randomize();
    if sort(&mut array).is_err() {
        #[cfg(feature = "esp32-log")]
        println!("[run] {} interrupted", name);
        return Ok(RunOutcome::Interrupted);
    }

    #[cfg(feature = "esp32-log")]
    if let Some(now) = array.now() {
        println!(
            "[run] {} running time: {} ms, {} comparisons",
            name,
            (now - start).as_millis(),
            array.comparisons()
        );
    }

    let misplaced = array.mark_unsorted();
    if misplaced > 0 {
        #[cfg(feature = "esp32-log")]
        println!("[run] {} left {} cells out of order", name, misplaced);
    }

    finish(&mut array);
    Ok(RunOutcome::Completed)
}

/// Empty the table, insert keys and flush.
pub fn run_hash<S, C, H, F>(
    strip: S,
    clock: C,
    mut hooks: H,
    name: &str,
    config: &RunConfig,
    insert: F,
) -> Result<RunOutcome, TooManyItems>
where
    S: LedStrip,
    C: Clock,
    H: Hooks,
    F: FnOnce(&mut DrivenArray<S, HuePalette, C, H>) -> Result<(), Interrupted>,
{
    hooks.on_algorithm(name);
    let len = strip.size();
    #[cfg(feature = "esp32-log")]
    let start = clock.now();

    let palette = HuePalette::new(config.flash);
    let driver = AnimationDriver::new(strip, palette, clock, hooks, config.pacing);
    let mut array = ItemArray::new(len, driver, config.seed)?;

    array.blacken();
    if insert(&mut array).is_err() {
        #[cfg(feature = "esp32-log")]
        println!("[run] {} interrupted", name);
        return Ok(RunOutcome::Interrupted);
    }

    #[cfg(feature = "esp32-log")]
    if let Some(now) = array.now() {
        println!("[run] {} running time: {} ms", name, (now - start).as_millis());
    }

    finish(&mut array);
    Ok(RunOutcome::Completed)
}

/// Blank the strip and run the SAT local search on it.
pub fn run_sat<S, C, H>(
    strip: S,
    clock: C,
    mut hooks: H,
    config: &RunConfig,
) -> Result<RunOutcome, TooManyItems>
where
    S: LedStrip,
    C: Clock,
    H: Hooks,
{
    let name = AlgorithmId::LawaSat.display_name();
    hooks.on_algorithm(name);
    let len = strip.size();

    let mut palette = SatPalette::new(sat::variables_for(len));
    palette.flash = config.flash;
    let driver = AnimationDriver::new(strip, palette, clock, hooks, config.pacing);
    let mut array = ItemArray::new(len, driver, config.seed)?;

    array.blacken();
    let Ok(unsatisfied) = sat::lawa_sat(&mut array) else {
        #[cfg(feature = "esp32-log")]
        println!("[run] {} interrupted", name);
        return Ok(RunOutcome::Interrupted);
    };
    if unsatisfied > 0 {
        #[cfg(feature = "esp32-log")]
        println!("[run] {} left {} clauses unsatisfied", name, unsatisfied);
    }

    finish(&mut array);
    Ok(RunOutcome::Completed)
}

/// Run a catalogue entry with its tuned pacing.
pub fn run_algorithm<S, C, H>(
    id: AlgorithmId,
    strip: S,
    clock: C,
    hooks: H,
    seed: u64,
) -> Result<RunOutcome, TooManyItems>
where
    S: LedStrip,
    C: Clock,
    H: Hooks,
{
    let config = RunConfig::new(id.default_pacing(), seed);
    run_algorithm_with(id, strip, clock, hooks, &config)
}

/// Run a catalogue entry with explicit settings.
pub fn run_algorithm_with<S, C, H>(
    id: AlgorithmId,
    strip: S,
    clock: C,
    hooks: H,
    config: &RunConfig,
) -> Result<RunOutcome, TooManyItems>
where
    S: LedStrip,
    C: Clock,
    H: Hooks,
{
    let name = id.display_name();
    match id.kind() {
        AlgorithmKind::Sort => run_sort(strip, clock, hooks, name, config, |a| id.apply(a)),
        AlgorithmKind::Hash => run_hash(strip, clock, hooks, name, config, |a| id.apply(a)),
        AlgorithmKind::Sat => run_sat(strip, clock, hooks, config),
    }
}
