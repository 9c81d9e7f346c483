use uuid::Uuid;

use crate::capabilities::Environment;
use crate::features::for_each::action::ForEachAction;
use crate::features::for_each::state::ForEachState;
use crate::features::number::{NumberAction, NumberReducer, NumberState};
use crate::mvi::{Effect, ForEach, IdentifiedAction, IdentifiedVec, Reducer, ReducerExt};
use crate::{action_case, state_field};

struct ForEachCore;

impl Reducer for ForEachCore {
    type State = ForEachState;
    type Action = ForEachAction;

    fn reduce(&self, state: &mut ForEachState, action: ForEachAction) -> Effect<ForEachAction> {
        match action {
            ForEachAction::Number(_) => {}
            ForEachAction::AddNumber => {
                state.numbers.push(NumberState::new());
            }
            ForEachAction::RemoveNumber(id) => {
                if state.numbers.remove(&id).is_none() {
                    tracing::debug!(id = %id, "remove for unknown number ignored");
                }
            }
        }
        Effect::none()
    }
}

pub struct ForEachReducer {
    inner: ForEach<ForEachCore, NumberReducer>,
}

impl ForEachReducer {
    pub fn new(env: Environment) -> Self {
        Self {
            inner: ForEachCore.for_each(
                "numbers",
                state_field!(ForEachState => IdentifiedVec<NumberState>, numbers),
                action_case!(ForEachAction => IdentifiedAction<Uuid, NumberAction>, Number),
                NumberReducer::new(env),
            ),
        }
    }
}

impl Reducer for ForEachReducer {
    type State = ForEachState;
    type Action = ForEachAction;

    fn reduce(&self, state: &mut ForEachState, action: ForEachAction) -> Effect<ForEachAction> {
        self.inner.reduce(state, action)
    }
}
