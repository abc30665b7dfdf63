//! Exact-name command parser for scripted play and tests.

use adventure_rules::{Action, Command, ObjectRef, World};

use super::CommandParser;

/// Common verbs accepted in place of the core action names.
const ALIASES: &[(&str, Action)] = &[
    ("go", Action::Move),
    ("walk", Action::Move),
    ("enter", Action::Move),
    ("get", Action::Take),
    ("grab", Action::Take),
    ("put", Action::Drop),
    ("look", Action::Examine),
    ("read", Action::Examine),
    ("x", Action::Examine),
    ("open", Action::Use),
    ("pull", Action::Use),
    ("push", Action::Use),
];

/// Parses `"<verb> <object name>"`.
///
/// Object names must match exactly, ignoring case. A bare `look` or
/// `examine` refers to the current location.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbNounParser;

impl VerbNounParser {
    pub fn new() -> Self {
        Self
    }

    fn action(verb: &str) -> Option<Action> {
        verb.parse::<Action>().ok().or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(verb))
                .map(|(_, action)| *action)
        })
    }

    fn object(world: &World, name: &str) -> Option<ObjectRef> {
        world.lookup(name).or_else(|| {
            world
                .object_refs()
                .find(|id| world.name_of(*id).eq_ignore_ascii_case(name))
        })
    }
}

impl CommandParser for VerbNounParser {
    fn parse(&mut self, world: &World, input: &str) -> Option<Command> {
        let mut words = input.split_whitespace();
        let action = Self::action(words.next()?)?;
        let name = words.collect::<Vec<_>>().join(" ");

        if name.is_empty() {
            return match action {
                Action::Examine => Some(Command::new(action, world.current_location())),
                _ => None,
            };
        }

        let name = match name.get(..4) {
            Some(article) if article.eq_ignore_ascii_case("the ") => &name[4..],
            _ => name.as_str(),
        };
        Self::object(world, name).map(|target| Command::new(action, target))
    }
}
