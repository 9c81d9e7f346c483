use thiserror::Error;
use uuid::Uuid;

use crate::features::for_each::ForEachAction;
use crate::features::item::{Item, ItemAction, ItemState};
use crate::features::navigation::{
    AlertAction, DestinationAction, DestinationState, DialogAction, NavigationAction,
};
use crate::features::number::NumberAction;
use crate::features::root::{RootAction, RootState, RootTab};
use crate::features::stack_nav::{PathAction, PathState, StackNavAction};
use crate::mvi::{IdentifiedAction, PresentationAction, StackAction};

pub const HELP: &str = "\
commands:
  tab number|navigation|stack|for-each
  inc | dec | fact | timer on|off          number tab counter
  alert hello|warning | dialog              present an alert or dialog
  sheet | cover | push                      present the item
  reset | dismiss | close | favorite | switch
  stack push number|item | stack pop <len>
  stack inc|dec|fact|timer on|off           top of the stack, if a number
  list add | list remove <i>
  list inc|dec|fact <i> | list timer <i> on|off
  state | help | quit";

/// One parsed line of driver input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Send(RootAction),
    PrintState,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Parse a command line against the current state. Blank lines yield `None`.
///
/// The state is needed to resolve positions to element ids and to know
/// which destination is presented.
pub fn parse_command(line: &str, state: &RootState) -> Result<Option<Input>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = words.split_first() else {
        return Ok(None);
    };

    let input = match head {
        "quit" | "exit" => Input::Quit,
        "state" => Input::PrintState,
        "help" => Input::Help,
        "tab" => match rest {
            [name] => Input::Send(RootAction::SelectedTab(
                name.parse::<RootTab>().map_err(CommandError::Invalid)?,
            )),
            _ => return Err(CommandError::Usage("tab number|navigation|stack|for-each")),
        },
        "inc" | "dec" | "fact" | "timer" => Input::Send(RootAction::Number(number_action(head, rest)?)),
        "alert" => match rest {
            ["hello"] => navigation(NavigationAction::ShowHelloAlertTapped),
            ["warning"] => navigation(NavigationAction::ShowWarningAlertTapped),
            _ => return Err(CommandError::Usage("alert hello|warning")),
        },
        "dialog" => navigation(NavigationAction::ShowConfirmationDialogTapped),
        "sheet" => navigation(NavigationAction::ShowItemAsSheet(state.navigation.item.clone())),
        "cover" => navigation(NavigationAction::ShowItemAsFullScreenCover(
            state.navigation.item.clone(),
        )),
        "push" => navigation(NavigationAction::ShowItemAsNavigation(state.navigation.item.clone())),
        "dismiss" => navigation(NavigationAction::Destination(PresentationAction::Dismiss)),
        "close" => navigation(NavigationAction::CloseSheetButtonTapped),
        "switch" => navigation(NavigationAction::SwitchToNumberTabTapped),
        "reset" => {
            let action = match state.navigation.destination.get() {
                Some(DestinationState::Alert(_)) => DestinationAction::Alert(AlertAction::Reset),
                Some(DestinationState::Dialog(_)) => DestinationAction::Dialog(DialogAction::Reset),
                _ => return Err(CommandError::Invalid("no alert or dialog is presented".into())),
            };
            navigation(NavigationAction::Destination(PresentationAction::Presented(action)))
        }
        "favorite" => {
            let action = match state.navigation.destination.get() {
                Some(DestinationState::ItemAsSheet(_)) => {
                    DestinationAction::ItemAsSheet(ItemAction::FavoriteToggled)
                }
                Some(DestinationState::ItemAsNavigation(_)) => {
                    DestinationAction::ItemAsNavigation(ItemAction::FavoriteToggled)
                }
                Some(DestinationState::ItemAsFullScreenCover(_)) => {
                    DestinationAction::ItemAsFullScreenCover(ItemAction::FavoriteToggled)
                }
                _ => return Err(CommandError::Invalid("no item is presented".into())),
            };
            navigation(NavigationAction::Destination(PresentationAction::Presented(action)))
        }
        "stack" => Input::Send(RootAction::Stack(stack_action(rest, state)?)),
        "list" => Input::Send(RootAction::ForEach(list_action(rest, state)?)),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(input))
}

fn navigation(action: NavigationAction) -> Input {
    Input::Send(RootAction::Navigation(action))
}

fn number_action(head: &str, rest: &[&str]) -> Result<NumberAction, CommandError> {
    match (head, rest) {
        ("inc", []) => Ok(NumberAction::IncrementTapped),
        ("dec", []) => Ok(NumberAction::DecrementTapped),
        ("fact", []) => Ok(NumberAction::RetrieveFactTapped),
        ("timer", ["on"]) => Ok(NumberAction::SetTimer(true)),
        ("timer", ["off"]) => Ok(NumberAction::SetTimer(false)),
        ("timer", _) => Err(CommandError::Usage("timer on|off")),
        _ => Err(CommandError::Usage("inc | dec | fact | timer on|off")),
    }
}

fn stack_action(rest: &[&str], state: &RootState) -> Result<StackNavAction, CommandError> {
    match rest {
        ["push", "number"] => Ok(StackNavAction::NavigateToNumber),
        ["push", "item"] => Ok(StackNavAction::Path(StackAction::Push(PathState::Item(
            ItemState::new(Item::new("Test")),
        )))),
        ["pop", len] => Ok(StackNavAction::Path(StackAction::PopTo(parse_index(len)?))),
        [head, tail @ ..] => {
            let action = number_action(head, tail)?;
            match state.stack.path.last() {
                Some((id, PathState::Number(_))) => Ok(StackNavAction::Path(StackAction::Element {
                    id,
                    action: PathAction::Number(action),
                })),
                _ => Err(CommandError::Invalid("top of the stack is not a number".into())),
            }
        }
        [] => Err(CommandError::Usage("stack push number|item | stack pop <len>")),
    }
}

fn list_action(rest: &[&str], state: &RootState) -> Result<ForEachAction, CommandError> {
    let numbers = &state.for_each.numbers;
    let id_at = |index: &str| -> Result<Uuid, CommandError> {
        let index = parse_index(index)?;
        numbers
            .get_index(index)
            .map(|number| number.id)
            .ok_or_else(|| CommandError::Invalid(format!("no number at position {index}")))
    };
    let element = |index: &str, action: NumberAction| -> Result<ForEachAction, CommandError> {
        Ok(ForEachAction::Number(IdentifiedAction::new(id_at(index)?, action)))
    };

    match rest {
        ["add"] => Ok(ForEachAction::AddNumber),
        ["remove", index] => Ok(ForEachAction::RemoveNumber(id_at(*index)?)),
        ["timer", index, toggle] => element(*index, number_action("timer", &[*toggle])?),
        [head, index] => element(*index, number_action(head, &[])?),
        _ => Err(CommandError::Usage("list add | list remove <i> | list inc|dec|fact <i> | list timer <i> on|off")),
    }
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::Invalid(format!("'{raw}' is not a position")))
}
