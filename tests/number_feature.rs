mod common;

use common::{manual_env, settle, FailingFacts, FixedFacts, PendingFacts, FACT};

use newtca::capabilities::{Environment, FactError, TokioClock};
use newtca::features::number::{NumberAction, NumberReducer, NumberState, NumberViewState};
use newtca::mvi::TestStore;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn increment_then_fetch_fact() {
    let facts = FixedFacts::default();
    let (env, _clock) = manual_env(facts.clone());
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env));

    store.send(NumberAction::IncrementTapped, |s| s.count = 1);
    store.send(NumberAction::RetrieveFactTapped, |s| s.is_retrieving_fact = true);
    store
        .receive(NumberAction::FactResponse(Ok(FACT.to_string())), |s| {
            s.is_retrieving_fact = false;
            s.fact = FACT.to_string();
        })
        .await;
    store.finish().await;

    assert_eq!(*facts.requests.lock(), vec![1]);
}

#[tokio::test]
async fn failed_fact_clears_loading_and_keeps_fact() {
    let (env, _clock) = manual_env(FailingFacts);
    let mut state = NumberState::new();
    state.fact = "previous".into();
    let mut store = TestStore::new(state, NumberReducer::new(env));

    store.send(NumberAction::RetrieveFactTapped, |s| s.is_retrieving_fact = true);
    store
        .receive(NumberAction::FactResponse(Err(FactError::Status(500))), |s| {
            s.is_retrieving_fact = false;
        })
        .await;
    assert_eq!(store.state().fact, "previous");
    store.finish().await;
}

#[tokio::test]
async fn counter_ignores_taps_while_retrieving() {
    let pending = PendingFacts::default();
    let (env, _clock) = manual_env(pending);
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env));

    store.send(NumberAction::RetrieveFactTapped, |s| s.is_retrieving_fact = true);
    store.send(NumberAction::IncrementTapped, |_| {});
    store.send(NumberAction::DecrementTapped, |_| {});
    assert_eq!(store.state().count, 0);
}

#[tokio::test]
async fn decrement_never_goes_below_zero() {
    let (env, _clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env));

    store.send(NumberAction::IncrementTapped, |s| s.count = 1);
    store.send(NumberAction::DecrementTapped, |s| s.count = 0);
    store.send(NumberAction::DecrementTapped, |_| {});
    store.finish().await;
}

#[tokio::test]
async fn second_fetch_replaces_the_first() {
    let pending = PendingFacts::default();
    let (env, _clock) = manual_env(pending.clone());
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env));

    store.send(NumberAction::RetrieveFactTapped, |s| s.is_retrieving_fact = true);
    settle(|| store.effects().in_flight() == 1).await;
    store.send(NumberAction::RetrieveFactTapped, |_| {});

    settle(|| pending.was_dropped()).await;
    settle(|| store.effects().in_flight() == 1).await;
}

#[tokio::test]
async fn timer_ticks_increment_until_turned_off() {
    let (env, clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env));

    store.send(NumberAction::SetTimer(true), |s| s.is_timer_on = true);
    assert_eq!(clock.active_timers(), 1);

    assert_eq!(clock.tick(), 1);
    store.receive(NumberAction::TimerTick, |s| s.count = 1).await;
    assert_eq!(clock.tick(), 1);
    store.receive(NumberAction::TimerTick, |s| s.count = 2).await;

    store.send(NumberAction::SetTimer(false), |s| s.is_timer_on = false);
    settle(|| clock.active_timers() == 0).await;
    assert_eq!(clock.tick(), 0);
    store.finish().await;
}

#[tokio::test]
async fn turning_timer_on_twice_keeps_one_timer() {
    let (env, clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env));

    store.send(NumberAction::SetTimer(true), |s| s.is_timer_on = true);
    store.send(NumberAction::SetTimer(true), |_| {});
    settle(|| clock.active_timers() == 1).await;

    clock.tick();
    store.receive(NumberAction::TimerTick, |s| s.count = 1).await;

    store.send(NumberAction::SetTimer(false), |s| s.is_timer_on = false);
    store.finish().await;
}

#[tokio::test]
async fn fetching_a_fact_stops_the_timer() {
    let (env, clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env));

    store.send(NumberAction::SetTimer(true), |s| s.is_timer_on = true);
    store.send(NumberAction::RetrieveFactTapped, |s| {
        s.is_timer_on = false;
        s.is_retrieving_fact = true;
    });
    settle(|| clock.active_timers() == 0).await;
    assert_eq!(clock.tick(), 0);

    store
        .receive(NumberAction::FactResponse(Ok(FACT.to_string())), |s| {
            s.is_retrieving_fact = false;
            s.fact = FACT.to_string();
        })
        .await;
    store.finish().await;
}

#[tokio::test(start_paused = true)]
async fn real_timer_switched_off_before_first_tick_never_fires() {
    let env = Environment::new(
        Arc::new(FixedFacts::default()),
        Arc::new(TokioClock),
        Duration::from_secs(1),
    );
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env));

    store.send(NumberAction::SetTimer(true), |s| s.is_timer_on = true);
    tokio::time::sleep(Duration::from_millis(500)).await;
    store.send(NumberAction::SetTimer(false), |s| s.is_timer_on = false);
    tokio::time::sleep(Duration::from_secs(3)).await;
    store.finish().await;
}

#[tokio::test(start_paused = true)]
async fn real_timer_ticks_once_per_interval() {
    let env = Environment::new(
        Arc::new(FixedFacts::default()),
        Arc::new(TokioClock),
        Duration::from_secs(1),
    );
    let mut store = TestStore::new(NumberState::new(), NumberReducer::new(env))
        .with_timeout(Duration::from_secs(2));

    store.send(NumberAction::SetTimer(true), |s| s.is_timer_on = true);
    store.receive(NumberAction::TimerTick, |s| s.count = 1).await;
    store.receive(NumberAction::TimerTick, |s| s.count = 2).await;
    store.send(NumberAction::SetTimer(false), |s| s.is_timer_on = false);
    store.finish().await;
}

#[test]
fn view_state_mirrors_the_counter() {
    let mut state = NumberState::new();
    state.count = 7;
    state.fact = FACT.into();
    state.is_timer_on = true;

    let view = NumberViewState::from(&state);
    assert_eq!(view.count, 7);
    assert_eq!(view.fact, FACT);
    assert!(view.is_timer_on);
    assert!(!view.is_retrieving_fact);
}
