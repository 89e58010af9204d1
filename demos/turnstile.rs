//! Turnstile State Machine
//!
//! This example demonstrates event-driven transitions with undo and redo.
//!
//! Key concepts:
//! - Enum identifiers declared with `identifier_enum!`
//! - Rejected events leave the machine untouched
//! - Undo/redo over the transition history
//! - Structured logging through `tracing`
//!
//! Run with: RUST_LOG=debug cargo run --example turnstile

use rewind::{identifier_enum, StateMachineBuilder};
use tracing_subscriber::EnvFilter;

identifier_enum! {
    enum Turnstile {
        Locked,
        Unlocked,
        Broken,
    }
}

identifier_enum! {
    enum Input {
        Coin,
        Push,
        Kick,
        Repair,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Turnstile State Machine ===\n");

    let mut turnstile = StateMachineBuilder::<Turnstile, Input>::new()
        .initial(Turnstile::Locked)
        .transition(Turnstile::Locked, Input::Coin, Turnstile::Unlocked)
        .transition(Turnstile::Locked, Input::Kick, Turnstile::Broken)
        .transition(Turnstile::Unlocked, Input::Push, Turnstile::Locked)
        .transition(Turnstile::Unlocked, Input::Coin, Turnstile::Unlocked)
        .transition(Turnstile::Broken, Input::Repair, Turnstile::Locked)
        .max_history(32)
        .build()
        .expect("turnstile configuration is valid");

    println!("Initial state: {:?}", turnstile.state());
    println!("States accepting a coin: {:?}\n", turnstile.states_for(Input::Coin));

    for input in [Input::Coin, Input::Push, Input::Push, Input::Kick] {
        match turnstile.trigger(input) {
            Ok(()) => println!("{:?} -> {:?}", input, turnstile.state()),
            Err(err) => println!("{:?} rejected: {}", input, err),
        }
    }

    println!("\nUndoing the kick...");
    turnstile.undo();
    println!("State: {:?}", turnstile.state());

    println!("Redoing it...");
    turnstile.redo();
    println!("State: {:?}", turnstile.state());

    turnstile.trigger(Input::Repair).expect("broken turnstile can be repaired");
    println!("Repaired: {:?}", turnstile.state());

    println!("\nJourney:");
    for transition in turnstile.journal().transitions() {
        println!(
            "  {:?} -> {:?} ({:?})",
            transition.from, transition.to, transition.kind
        );
    }

    println!("\n=== Example Complete ===");
}
