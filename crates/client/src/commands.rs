//! Parsing of typed player commands.

use game_core::{Direction, EquipSlot, PlayerAction};
use thiserror::Error;

/// Slot used by `save` and `load` without an argument.
pub const DEFAULT_SLOT: &str = "quicksave";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    /// Takes a turn.
    Act(PlayerAction),
    Potion,
    TownPortal,
    ReturnPortal,
    Inventory,
    /// Zero-based backpack index.
    Equip(usize),
    Unequip(EquipSlot),
    Shop,
    /// Zero-based stock index.
    Buy(usize),
    /// Zero-based backpack index.
    Sell(usize),
    Save(String),
    Load(String),
    Saves,
    Restart,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{command}' takes at most one argument")]
    TooManyArguments { command: String },

    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("'{value}' is not {expected}")]
    InvalidArgument {
        value: String,
        expected: &'static str,
    },
}

const NUMBER: &str = "an item number";
const SLOT: &str = "'weapon' or 'armor'";

impl ClientCommand {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let head = head.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        match head.as_str() {
            "save" | "load" => {
                let slot = match args.as_slice() {
                    [] => DEFAULT_SLOT.to_string(),
                    [slot] => slot.to_string(),
                    _ => return Err(ParseError::TooManyArguments { command: head }),
                };
                Ok(Some(if head == "save" {
                    ClientCommand::Save(slot)
                } else {
                    ClientCommand::Load(slot)
                }))
            }
            "buy" => Ok(Some(ClientCommand::Buy(Self::number(&head, &args)?))),
            "sell" => Ok(Some(ClientCommand::Sell(Self::number(&head, &args)?))),
            "equip" | "e" => Ok(Some(ClientCommand::Equip(Self::number(&head, &args)?))),
            "unequip" | "u" => {
                let value = Self::single(&head, &args, SLOT)?;
                let slot = value
                    .to_ascii_lowercase()
                    .parse::<EquipSlot>()
                    .map_err(|_| ParseError::InvalidArgument {
                        value: value.to_string(),
                        expected: SLOT,
                    })?;
                Ok(Some(ClientCommand::Unequip(slot)))
            }
            _ if !args.is_empty() => Err(ParseError::UnexpectedArgument(head)),
            "w" | "up" | "north" => Ok(Some(Self::step(Direction::Up))),
            "s" | "down" | "south" => Ok(Some(Self::step(Direction::Down))),
            "a" | "left" | "west" => Ok(Some(Self::step(Direction::Left))),
            "d" | "right" | "east" => Ok(Some(Self::step(Direction::Right))),
            "f" | "attack" => Ok(Some(ClientCommand::Act(PlayerAction::Attack))),
            "p" | "potion" => Ok(Some(ClientCommand::Potion)),
            "t" | "portal" => Ok(Some(ClientCommand::TownPortal)),
            "return" => Ok(Some(ClientCommand::ReturnPortal)),
            "i" | "inventory" => Ok(Some(ClientCommand::Inventory)),
            "shop" => Ok(Some(ClientCommand::Shop)),
            "saves" => Ok(Some(ClientCommand::Saves)),
            "restart" => Ok(Some(ClientCommand::Restart)),
            "status" => Ok(Some(ClientCommand::Status)),
            "help" | "?" => Ok(Some(ClientCommand::Help)),
            "q" | "quit" | "exit" => Ok(Some(ClientCommand::Quit)),
            _ => Err(ParseError::Unknown(head)),
        }
    }

    fn step(direction: Direction) -> Self {
        ClientCommand::Act(PlayerAction::step(direction))
    }

    fn single<'a>(
        command: &str,
        args: &[&'a str],
        expected: &'static str,
    ) -> Result<&'a str, ParseError> {
        match args {
            [value] => Ok(*value),
            [] => Err(ParseError::MissingArgument {
                command: command.to_string(),
                expected,
            }),
            _ => Err(ParseError::TooManyArguments {
                command: command.to_string(),
            }),
        }
    }

    /// Item numbers are shown starting at 1.
    fn number(command: &str, args: &[&str]) -> Result<usize, ParseError> {
        let value = Self::single(command, args, NUMBER)?;
        match value.parse::<usize>() {
            Ok(number) if number > 0 => Ok(number - 1),
            _ => Err(ParseError::InvalidArgument {
                value: value.to_string(),
                expected: NUMBER,
            }),
        }
    }
}

pub const HELP: &str = "\
commands:
  w/a/s/d, up/down/left/right   move one tile
  f, attack                     attack the nearest monster
  p, potion                     drink a health potion
  t, portal                     read a town portal scroll
  return                        step back through an open portal
  i, inventory                  list equipment and backpack
  e, equip <n>                  wear backpack item n
  u, unequip weapon|armor       move worn gear to the backpack
  shop                          list the shop's wares
  buy <n>, sell <n>             trade with the shop (stand next to it)
  save [slot], load [slot]      save or load (default slot: quicksave)
  saves                         list save slots
  restart                       start over
  status                        show the warrior
  quit                          leave the game";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_aliases() {
        for (line, dx, dy) in [("w", 0, -1), ("DOWN", 0, 1), ("a", -1, 0), (" right ", 1, 0)] {
            assert_eq!(
                ClientCommand::parse(line),
                Ok(Some(ClientCommand::Act(PlayerAction::Move { dx, dy }))),
                "{line}"
            );
        }
    }

    #[test]
    fn attack_and_potion() {
        assert_eq!(
            ClientCommand::parse("f"),
            Ok(Some(ClientCommand::Act(PlayerAction::Attack)))
        );
        assert_eq!(ClientCommand::parse("potion"), Ok(Some(ClientCommand::Potion)));
    }

    #[test]
    fn save_slots_default_to_quicksave() {
        assert_eq!(
            ClientCommand::parse("save"),
            Ok(Some(ClientCommand::Save("quicksave".into())))
        );
        assert_eq!(
            ClientCommand::parse("load crypt_run"),
            Ok(Some(ClientCommand::Load("crypt_run".into())))
        );
        assert!(matches!(
            ClientCommand::parse("save a b"),
            Err(ParseError::TooManyArguments { .. })
        ));
    }

    #[test]
    fn trade_and_gear_commands() {
        assert_eq!(ClientCommand::parse("buy 2"), Ok(Some(ClientCommand::Buy(1))));
        assert_eq!(ClientCommand::parse("sell 1"), Ok(Some(ClientCommand::Sell(0))));
        assert_eq!(ClientCommand::parse("e 3"), Ok(Some(ClientCommand::Equip(2))));
        assert_eq!(
            ClientCommand::parse("unequip Armor"),
            Ok(Some(ClientCommand::Unequip(EquipSlot::Armor)))
        );
        assert_eq!(ClientCommand::parse("t"), Ok(Some(ClientCommand::TownPortal)));
        assert_eq!(ClientCommand::parse("return"), Ok(Some(ClientCommand::ReturnPortal)));
    }

    #[test]
    fn bad_item_numbers_are_rejected() {
        assert_eq!(
            ClientCommand::parse("buy 0").unwrap_err().to_string(),
            "'0' is not an item number"
        );
        assert_eq!(
            ClientCommand::parse("sell").unwrap_err().to_string(),
            "'sell' needs an item number"
        );
        assert!(matches!(
            ClientCommand::parse("unequip boots"),
            Err(ParseError::InvalidArgument { .. })
        ));
        assert!(matches!(
            ClientCommand::parse("buy 1 2"),
            Err(ParseError::TooManyArguments { .. })
        ));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(ClientCommand::parse("   "), Ok(None));
        assert_eq!(
            ClientCommand::parse("dance"),
            Err(ParseError::Unknown("dance".into()))
        );
        assert_eq!(
            ClientCommand::parse("quit now"),
            Err(ParseError::UnexpectedArgument("quit".into()))
        );
    }
}
