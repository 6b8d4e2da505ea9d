//! Example: live per-player totals
//!
//! A feed of score events arrives every 500ms. Each player gets a group, and
//! each group keeps a running total with `scan`. Runs on a `futures`
//! `LocalPool` with real timers.

use futures::executor::LocalPool;
use rxlite::prelude::*;

#[derive(Clone, Copy, Debug)]
struct ScoreEvent {
  player: u32,
  points: u32,
}

const EVENTS: [ScoreEvent; 6] = [
  ScoreEvent { player: 1, points: 3 },
  ScoreEvent { player: 2, points: 1 },
  ScoreEvent { player: 1, points: 1 },
  ScoreEvent { player: 3, points: 0 },
  ScoreEvent { player: 2, points: 3 },
  ScoreEvent { player: 3, points: 4 },
];

fn main() {
  env_logger::init();
  let mut pool = LocalPool::new();
  let scheduler = LocalScheduler::new(pool.spawner());

  observable::from_iter(EVENTS)
    .concat_map(move |event| observable::of(event).delay(Duration::from_millis(500), scheduler.clone()))
    .group_by(|event: &ScoreEvent| event.player)
    .merge_map(|group| {
      let player = *group.key();
      group.scan_initial((player, 0), |(player, total), event: ScoreEvent| (player, total + event.points))
    })
    .subscribe_all(
      |(player, total)| println!("player {player}: {total}"),
      |e| match e {},
      || println!("feed closed"),
    );

  pool.run();
}
