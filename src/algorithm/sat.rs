//! Lazy WalkSAT local search on a random 3-SAT formula.
//!
//! The first `variables` cells hold the current assignment, one cell per
//! variable, the following cells hold how many literals of each clause are
//! currently true. Flipping a variable therefore lights up the variable
//! and every clause counter it touches.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    array::{AccessObserver, Interrupted, ItemArray},
    driver::NEGATIVE_LITERAL,
    item::{Item, Value},
};

/// Largest formula the search builds
pub const MAX_VARIABLES: usize = 80;

/// Clauses per variable, in tenths
pub const CLAUSE_RATIO_TENTHS: usize = 42;

/// Search rounds before giving up
pub const MAX_ROUNDS: u32 = 50_000;

const LITERALS: usize = 3;

/// Signed literal: `+v` or `-v` for the 1-based variable `v`
type Literal = i32;
type Clause = [Literal; LITERALS];

/// Number of variables that fit a strip of `len` cells together with their
/// clause counters, or 0 when not even a single 3-literal clause fits.
pub const fn variables_for(len: usize) -> usize {
    let vars = len * 10 / (10 + CLAUSE_RATIO_TENTHS);
    let vars = if vars > MAX_VARIABLES {
        MAX_VARIABLES
    } else {
        vars
    };
    if vars < LITERALS { 0 } else { vars }
}

pub const fn clauses_for(variables: usize) -> usize {
    variables * CLAUSE_RATIO_TENTHS / 10
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn encode(literal: Literal) -> Value {
    let var = literal.unsigned_abs() as Value;
    if literal > 0 {
        var
    } else {
        NEGATIVE_LITERAL | var
    }
}

#[allow(clippy::cast_sign_loss)]
fn variable(literal: Literal) -> usize {
    literal.unsigned_abs() as usize
}

struct Lawa {
    variables: usize,
    clauses: Vec<Clause>,
    positive: Vec<Vec<usize>>,
    negative: Vec<Vec<usize>>,
    unsat: Vec<usize>,
}

impl Lawa {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn random<O: AccessObserver>(a: &mut ItemArray<O>, variables: usize) -> Self {
        let pick = |a: &mut ItemArray<O>| (1 + a.random(variables)) as Literal;
        let sign = |a: &mut ItemArray<O>, v: Literal| if a.random(2) == 0 { v } else { -v };

        let mut clauses = Vec::with_capacity(clauses_for(variables));
        for _ in 0..clauses_for(variables) {
            let v1 = pick(a);
            let mut v2 = pick(a);
            let mut v3 = pick(a);
            while v1 == v2 || v1 == v3 || v2 == v3 {
                v2 = pick(a);
                v3 = pick(a);
            }
            clauses.push([sign(a, v1), sign(a, v2), sign(a, v3)]);
        }

        let mut positive = vec![Vec::new(); variables + 1];
        let mut negative = vec![Vec::new(); variables + 1];
        for (id, clause) in clauses.iter().enumerate() {
            for &literal in clause {
                if literal > 0 {
                    positive[variable(literal)].push(id);
                } else {
                    negative[variable(literal)].push(id);
                }
            }
        }

        Self {
            variables,
            clauses,
            positive,
            negative,
            unsat: Vec::new(),
        }
    }

    fn var_cell(&self, var: usize) -> usize {
        var - 1
    }

    fn clause_cell(&self, clause: usize) -> usize {
        self.variables + clause
    }

    fn is_true<O: AccessObserver>(&self, a: &ItemArray<O>, literal: Literal) -> bool {
        a.cells()[self.var_cell(variable(literal))].value() == encode(literal)
    }

    fn satisfied<O: AccessObserver>(&self, a: &ItemArray<O>, clause: usize) -> Value {
        a.cells()[self.clause_cell(clause)].value()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn initialize<O: AccessObserver>(&mut self, a: &mut ItemArray<O>) {
        for var in 1..=self.variables {
            let v = var as Literal;
            let literal = if a.random(2) == 0 { v } else { -v };
            a.set(self.var_cell(var), Item::new(encode(literal)));
        }

        for id in 0..self.clauses.len() {
            let count = self.clauses[id]
                .iter()
                .filter(|&&literal| self.is_true(a, literal))
                .count();
            if count == 0 {
                self.unsat.push(id);
            }
            a.set(self.clause_cell(id), Item::new(count as Value));
        }
    }

    fn make_score<O: AccessObserver>(&self, a: &ItemArray<O>, literal: Literal) -> i32 {
        let occurrences = if literal > 0 {
            &self.positive[variable(literal)]
        } else {
            &self.negative[variable(literal)]
        };
        let score = occurrences
            .iter()
            .filter(|&&id| self.satisfied(a, id) == 0)
            .count();
        i32::try_from(score).unwrap_or(i32::MAX)
    }

    fn break_score<O: AccessObserver>(&self, a: &ItemArray<O>, literal: Literal) -> i32 {
        let occurrences = if literal > 0 {
            &self.negative[variable(literal)]
        } else {
            &self.positive[variable(literal)]
        };
        let score = occurrences
            .iter()
            .filter(|&&id| self.satisfied(a, id) == 1)
            .count();
        i32::try_from(score).unwrap_or(i32::MAX)
    }

    fn flip<O: AccessObserver>(&mut self, a: &mut ItemArray<O>, literal: Literal) {
        let var = variable(literal);
        let (falling, rising) = if literal > 0 {
            (&self.negative[var], &self.positive[var])
        } else {
            (&self.positive[var], &self.negative[var])
        };

        for &id in falling {
            let cell = self.variables + id;
            a.decrement(cell);
            if a.cells()[cell].value() == 0 {
                self.unsat.push(id);
            }
        }
        for &id in rising {
            a.increment(self.variables + id);
        }

        a.set(self.var_cell(var), Item::new(encode(literal)));
    }

    fn search<O: AccessObserver>(&mut self, a: &mut ItemArray<O>) -> Result<usize, Interrupted> {
        let mut round = 0;
        while !self.unsat.is_empty() {
            a.checkpoint()?;
            round += 1;
            if round >= MAX_ROUNDS {
                break;
            }

            let pick = a.random(self.unsat.len());
            let id = self.unsat.swap_remove(pick);
            if self.satisfied(a, id) > 0 {
                continue;
            }

            let clause = self.clauses[id];
            let mut first = a.random(LITERALS);
            let mut second = a.random(LITERALS);
            while first == second {
                first = a.random(LITERALS);
                second = a.random(LITERALS);
            }
            let (lit1, lit2) = (clause[first], clause[second]);

            let score1 = self.make_score(a, lit1) - self.break_score(a, lit1);
            let score2 = self.make_score(a, lit2) - self.break_score(a, lit2);

            if score1 == score2 {
                self.flip(a, lit1);
                self.flip(a, lit2);
            } else {
                self.flip(a, if score1 > score2 { lit1 } else { lit2 });
            }
        }

        let unsatisfied = (0..self.clauses.len())
            .filter(|&id| self.satisfied(a, id) == 0)
            .count();

        #[cfg(feature = "esp32-log")]
        println!(
            "[sat] finished after {} rounds, {} unsatisfied clauses",
            round, unsatisfied
        );

        Ok(unsatisfied)
    }
}

/// Build a random formula sized for the array and search for a satisfying
/// assignment. Returns how many clauses are left unsatisfied.
pub fn lawa_sat<O: AccessObserver>(a: &mut ItemArray<O>) -> Result<usize, Interrupted> {
    let variables = variables_for(a.len());
    if variables == 0 {
        return Ok(0);
    }
    let mut lawa = Lawa::random(a, variables);
    lawa.initialize(a);
    lawa.search(a)
}
