mod common;

use common::{manual_env, settle, FixedFacts};

use newtca::features::item::{Item, ItemAction, ItemState};
use newtca::capabilities::Environment;
use newtca::features::number::{NumberAction, NumberReducer, NumberState};
use newtca::features::stack_nav::{PathAction, PathState, StackNavAction, StackNavReducer, StackNavState};
use newtca::mvi::{
    Action, Effect, FeatureState, Reduce, Reducer, ReducerExt, StackAction, StackElementId,
    StackState, TestStore,
};
use newtca::{action_case, state_field};
use uuid::Uuid;

fn number(n: u128) -> PathState {
    PathState::Number(NumberState::with_id(Uuid::from_u128(n)))
}

fn push(state: PathState) -> StackNavAction {
    StackNavAction::Path(StackAction::Push(state))
}

fn element(id: StackElementId, action: NumberAction) -> StackNavAction {
    StackNavAction::Path(StackAction::Element {
        id,
        action: PathAction::Number(action),
    })
}

fn with_number(s: &mut StackNavState, id: StackElementId, f: impl FnOnce(&mut NumberState)) {
    if let Some(PathState::Number(n)) = s.path.get_mut(id) {
        f(n);
    }
}

#[test]
fn navigate_to_number_pushes_a_fresh_counter() {
    let (env, _clock) = manual_env(FixedFacts::default());
    let reducer = StackNavReducer::new(env);
    let mut state = StackNavState::default();

    let effect = reducer.reduce(&mut state, StackNavAction::NavigateToNumber);
    assert!(effect.is_none());
    assert_eq!(state.path.len(), 1);
    assert!(matches!(
        state.path.last(),
        Some((_, PathState::Number(n))) if n.count == 0 && !n.is_timer_on
    ));
}

#[tokio::test]
async fn popping_cancels_effects_of_removed_screens() {
    let (env, clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(StackNavState::default(), StackNavReducer::new(env));

    for n in 1..=3 {
        store.send(push(number(n)), |s| {
            s.path.push(number(n));
        });
    }
    let ids: Vec<_> = store.state().path.ids().collect();
    assert_eq!(ids.len(), 3);

    for &id in &ids[1..] {
        store.send(element(id, NumberAction::SetTimer(true)), |s| {
            with_number(s, id, |n| n.is_timer_on = true);
        });
    }
    assert_eq!(clock.active_timers(), 2);

    store.send(StackNavAction::Path(StackAction::PopTo(1)), |s| {
        s.path.pop_to(1);
    });
    assert_eq!(store.state().path.len(), 1);
    settle(|| clock.active_timers() == 0).await;
    assert_eq!(clock.tick(), 0);
    store.finish().await;
}

#[tokio::test]
async fn surviving_screens_keep_their_effects() {
    let (env, clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(StackNavState::default(), StackNavReducer::new(env));

    store.send(push(number(1)), |s| {
        s.path.push(number(1));
    });
    store.send(push(number(2)), |s| {
        s.path.push(number(2));
    });
    let ids: Vec<_> = store.state().path.ids().collect();

    store.send(element(ids[0], NumberAction::SetTimer(true)), |s| {
        with_number(s, ids[0], |n| n.is_timer_on = true);
    });
    store.send(element(ids[1], NumberAction::SetTimer(true)), |s| {
        with_number(s, ids[1], |n| n.is_timer_on = true);
    });

    store.send(StackNavAction::Path(StackAction::PopFrom(ids[1])), |s| {
        s.path.pop_from(ids[1]);
    });
    settle(|| clock.active_timers() == 1).await;

    assert_eq!(clock.tick(), 1);
    store
        .receive(element(ids[0], NumberAction::TimerTick), |s| {
            with_number(s, ids[0], |n| n.count = 1);
        })
        .await;

    store.send(element(ids[0], NumberAction::SetTimer(false)), |s| {
        with_number(s, ids[0], |n| n.is_timer_on = false);
    });
    store.finish().await;
}

#[tokio::test]
async fn actions_for_popped_screens_are_ignored() {
    let (env, clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(StackNavState::default(), StackNavReducer::new(env));

    store.send(push(number(1)), |s| {
        s.path.push(number(1));
    });
    let id = store.state().path.ids().next().expect("pushed");
    store.send(StackNavAction::Path(StackAction::pop_to_root()), |s| {
        s.path.pop_to_root();
    });

    store.send(element(id, NumberAction::IncrementTapped), |_| {});
    store.send(element(id, NumberAction::SetTimer(true)), |_| {});
    assert_eq!(clock.active_timers(), 0);
    store.finish().await;
}

#[tokio::test]
async fn pushed_ids_are_not_reused() {
    let (env, _clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(StackNavState::default(), StackNavReducer::new(env));

    store.send(push(number(1)), |s| {
        s.path.push(number(1));
    });
    let first = store.state().path.ids().next().expect("pushed");
    store.send(StackNavAction::Path(StackAction::PopTo(0)), |s| {
        s.path.pop_to(0);
    });
    store.send(push(number(1)), |s| {
        s.path.push(number(1));
    });
    let second = store.state().path.ids().next().expect("pushed");
    assert_ne!(first, second);
    store.finish().await;
}

#[tokio::test]
async fn item_screens_on_the_stack_handle_their_actions() {
    let (env, _clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(StackNavState::default(), StackNavReducer::new(env));
    let item = PathState::Item(ItemState::new(Item::new("Test")));

    store.send(push(item.clone()), |s| {
        s.path.push(item.clone());
    });
    let id = store.state().path.ids().next().expect("pushed");
    store.send(
        StackNavAction::Path(StackAction::Element {
            id,
            action: PathAction::Item(ItemAction::FavoriteToggled),
        }),
        |s| {
            if let Some(PathState::Item(item)) = s.path.get_mut(id) {
                item.is_favorite = true;
            }
        },
    );

    // A number action aimed at an item screen does nothing.
    store.send(element(id, NumberAction::IncrementTapped), |_| {});
    store.finish().await;
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Screens {
    path: StackState<NumberState>,
}

impl FeatureState for Screens {}

#[derive(Debug, Clone, PartialEq)]
enum ScreensAction {
    Restart,
    Path(StackAction<NumberState, NumberAction>),
}

impl Action for ScreensAction {}

fn counter(n: u128) -> NumberState {
    NumberState::with_id(Uuid::from_u128(n))
}

fn screens(env: Environment) -> impl Reducer<State = Screens, Action = ScreensAction> {
    Reduce::new(|state: &mut Screens, action: ScreensAction| {
        if let ScreensAction::Restart = action {
            state.path = StackState::new();
            state.path.push(counter(9));
        }
        Effect::none()
    })
    .for_each_stack(
        "path",
        state_field!(Screens => StackState<NumberState>, path),
        action_case!(ScreensAction => StackAction<NumberState, NumberAction>, Path),
        NumberReducer::new(env),
    )
}

#[tokio::test]
async fn replacing_the_stack_cancels_effects_of_the_old_screens() {
    let (env, clock) = manual_env(FixedFacts::default());
    let mut store = TestStore::new(Screens::default(), screens(env));

    store.send(ScreensAction::Path(StackAction::Push(counter(1))), |s| {
        s.path.push(counter(1));
    });
    let old = store.state().path.ids().next().expect("pushed");
    store.send(
        ScreensAction::Path(StackAction::Element {
            id: old,
            action: NumberAction::SetTimer(true),
        }),
        |s| {
            if let Some(n) = s.path.get_mut(old) {
                n.is_timer_on = true;
            }
        },
    );
    assert_eq!(clock.active_timers(), 1);

    store.send(ScreensAction::Restart, |s| {
        s.path = StackState::new();
        s.path.push(counter(9));
    });
    let new = store.state().path.ids().next().expect("restarted");
    assert_ne!(old, new);
    settle(|| clock.active_timers() == 0).await;
    assert_eq!(clock.tick(), 0);
    store.finish().await;
}
