use super::Player;
use crate::INCREMENT;
use crate::RollId;
use crate::SOLVER_TOLERANCE;
use crate::Score;
use crate::database::Table;
use crate::dice::Catalog;
use crate::dice::Roll;
use crate::game::Action;
use crate::game::Rules;
use crate::game::State;
use crate::solver::Selector;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// One console game around a table of seats.
///
/// States always put the mover first, so the session tracks which seat is
/// moving and maps scores back to seats for display.
pub struct Session<'a> {
    table: &'a Table,
    seats: Vec<Box<dyn Player + 'a>>,
    rng: SmallRng,
}

impl<'a> Session<'a> {
    pub fn new(table: &'a Table, seats: Vec<Box<dyn Player + 'a>>, seed: u64) -> Result<Self> {
        if seats.len() != table.rules().players() {
            bail!(
                "{} seats at a table solved for {} players",
                seats.len(),
                table.rules().players()
            );
        }
        Ok(Self {
            table,
            seats,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Play until someone reaches the target, returning the winning seat.
    pub fn play(&mut self) -> Result<usize> {
        let rules = *self.table.rules();
        let mut state = rules.initial();
        let mut seat = 0;
        println!("{}", format!("{}", rules).bold());
        while !rules.is_over(&state) {
            if state.at_turn_start() {
                println!("\n{}", self.standings(&state, seat));
            }
            let roll = Roll::throw(state.dice(), &mut self.rng);
            let id = Catalog::get().id(&roll);
            let choices = rules.choices(&state, id);
            let player = &self.seats[seat];
            let chosen = player.act(&state, id, &choices)?;
            let (action, next) = choices
                .iter()
                .copied()
                .find(|(action, _)| *action == chosen)
                .ok_or_else(|| anyhow!("{} is not allowed after rolling {}", chosen, roll))?;
            println!("seat {} {:?} rolled {:<12} {}", seat, player, roll.to_string(), action);
            if player.critiqued() {
                self.critique(&rules, &state, id, &action);
            }
            if !action.continues() {
                seat = (seat + 1) % rules.players();
            }
            state = next;
        }
        let winner = Self::winner(&rules, &state, seat);
        println!("\n{}", self.standings(&state, seat));
        println!("{}", format!("seat {} wins", winner).green().bold());
        Ok(winner)
    }

    /// seat holding the target score, given the seat now to move
    fn winner(rules: &Rules, state: &State, seat: usize) -> usize {
        let index = state
            .banked()
            .iter()
            .position(|&banked| banked >= rules.target())
            .expect("finished game has a winner");
        (seat + index) % rules.players()
    }

    /// compare the move taken against the best one for the same roll
    fn critique(&self, rules: &Rules, state: &State, roll: RollId, action: &Action) {
        let selector = Selector::new(rules, self.table);
        let (best, optimum) = selector.choose(state, roll);
        let chosen = selector
            .grade(state, action)
            .expect("chosen action is allowed");
        let loss = optimum.mover() - chosen.mover();
        match loss > SOLVER_TOLERANCE {
            true => println!(
                "{}",
                format!(
                    "  suboptimal: {} gives up {:.2}% against {}",
                    action,
                    loss * 100.,
                    best
                )
                .yellow()
            ),
            false => println!(
                "{}",
                format!("  optimal: {:.2}% to win", optimum.mover() * 100.).green()
            ),
        }
    }

    fn standings(&self, state: &State, seat: usize) -> String {
        let n = state.players();
        let mut scores = vec![0 as Score; n];
        for (i, &banked) in state.banked().iter().enumerate() {
            scores[(seat + i) % n] = banked;
        }
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                let entry = format!("seat {} {:>6}", i, score as u32 * INCREMENT);
                match i == seat {
                    true => entry.bold().to_string(),
                    false => entry.normal().to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join("  |  ")
    }
}
