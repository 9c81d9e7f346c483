use uuid::Uuid;

use crate::features::number::NumberAction;
use crate::mvi::{Action, IdentifiedAction};

#[derive(Debug, Clone, PartialEq)]
pub enum ForEachAction {
    Number(IdentifiedAction<Uuid, NumberAction>),
    /// Append a fresh counter.
    AddNumber,
    /// Remove a counter, cancelling its fact request and timer.
    RemoveNumber(Uuid),
}

impl Action for ForEachAction {}
