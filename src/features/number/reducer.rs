use std::sync::Arc;

use crate::capabilities::{next_tick, Environment};
use crate::features::number::action::NumberAction;
use crate::features::number::state::NumberState;
use crate::mvi::{CancelId, Effect, Reducer};

#[derive(Debug, Clone, Copy)]
enum CancelKey {
    RetrieveFact,
    Timer,
}

impl From<CancelKey> for CancelId {
    fn from(key: CancelKey) -> Self {
        match key {
            CancelKey::RetrieveFact => CancelId::new("retrieve_fact"),
            CancelKey::Timer => CancelId::new("timer"),
        }
    }
}

pub struct NumberReducer {
    env: Environment,
}

impl NumberReducer {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    fn retrieve_fact(&self, count: i64) -> Effect<NumberAction> {
        let facts = Arc::clone(&self.env.facts);
        Effect::task(async move { NumberAction::FactResponse(facts.fetch(count).await) })
            .cancellable(CancelKey::RetrieveFact)
    }

    fn timer(&self) -> Effect<NumberAction> {
        let clock = Arc::clone(&self.env.clock);
        let interval = self.env.timer_interval;
        Effect::run(move |sender| {
            let mut ticks = clock.timer(interval);
            async move {
                while next_tick(&mut ticks).await.is_some() {
                    if !sender.send(NumberAction::TimerTick) {
                        break;
                    }
                }
            }
        })
        .cancellable(CancelKey::Timer)
    }
}

impl Reducer for NumberReducer {
    type State = NumberState;
    type Action = NumberAction;

    fn reduce(&self, state: &mut NumberState, action: NumberAction) -> Effect<NumberAction> {
        match action {
            NumberAction::DecrementTapped => {
                if !state.is_retrieving_fact {
                    state.count = (state.count - 1).max(0);
                }
                Effect::none()
            }
            NumberAction::FactResponse(Ok(fact)) => {
                state.is_retrieving_fact = false;
                state.fact = fact;
                Effect::none()
            }
            NumberAction::FactResponse(Err(e)) => {
                tracing::warn!(error = %e, count = state.count, "fact request failed");
                state.is_retrieving_fact = false;
                Effect::none()
            }
            NumberAction::IncrementTapped => {
                if !state.is_retrieving_fact {
                    state.count += 1;
                }
                Effect::none()
            }
            NumberAction::RetrieveFactTapped => {
                state.is_retrieving_fact = true;
                state.is_timer_on = false;
                Effect::merge([
                    Effect::cancel(CancelKey::RetrieveFact),
                    Effect::cancel(CancelKey::Timer),
                    self.retrieve_fact(state.count),
                ])
            }
            NumberAction::SetTimer(is_on) => {
                state.is_timer_on = is_on;
                if is_on {
                    self.timer()
                } else {
                    Effect::cancel(CancelKey::Timer)
                }
            }
            NumberAction::TimerTick => {
                state.count += 1;
                Effect::none()
            }
        }
    }
}
