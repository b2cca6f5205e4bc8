//! Command parser — one interactive line into one engine `Action`.
//!
//! Tokens are whitespace separated. Ids and counts are non-negative
//! integers; `step` needs at least one tick.

use thiserror::Error;

use warehouse_core::actions::Action;
use warehouse_core::domain::CustomerKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error("{command} expects {expected} argument(s), got {got}")]
    Arity {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{command}: {value:?} is not a valid {field}")]
    BadArgument {
        command: &'static str,
        field: &'static str,
        value: String,
    },
}

pub fn parse_command(line: &str) -> Result<Action, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (name, args) = tokens.split_first().ok_or(CommandError::Empty)?;

    match *name {
        "step" => {
            arity("step", args, 1)?;
            let steps = int("step", "number of steps", args[0])?;
            if steps == 0 {
                return Err(bad("step", "number of steps", args[0]));
            }
            Ok(Action::SimulateStep { steps })
        }
        "order" => {
            arity("order", args, 1)?;
            Ok(Action::AddOrder {
                customer_id: int("order", "customer id", args[0])?,
            })
        }
        "customer" => {
            arity("customer", args, 4)?;
            let kind = CustomerKind::parse(args[1])
                .ok_or_else(|| bad("customer", "customer type", args[1]))?;
            Ok(Action::AddCustomer {
                name: args[0].to_string(),
                kind,
                distance: int("customer", "distance", args[2])?,
                max_orders: int("customer", "max orders", args[3])?,
            })
        }
        "orderStatus" => {
            arity("orderStatus", args, 1)?;
            Ok(Action::PrintOrderStatus {
                order_id: int("orderStatus", "order id", args[0])?,
            })
        }
        "customerStatus" => {
            arity("customerStatus", args, 1)?;
            Ok(Action::PrintCustomerStatus {
                customer_id: int("customerStatus", "customer id", args[0])?,
            })
        }
        "volunteerStatus" => {
            arity("volunteerStatus", args, 1)?;
            Ok(Action::PrintVolunteerStatus {
                volunteer_id: int("volunteerStatus", "volunteer id", args[0])?,
            })
        }
        "log" => {
            arity("log", args, 0)?;
            Ok(Action::PrintActionsLog)
        }
        "close" => {
            arity("close", args, 0)?;
            Ok(Action::Close)
        }
        "backup" => {
            arity("backup", args, 0)?;
            Ok(Action::BackupWarehouse)
        }
        "restore" => {
            arity("restore", args, 0)?;
            Ok(Action::RestoreWarehouse)
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn arity(command: &'static str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::Arity {
            command,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn bad(command: &'static str, field: &'static str, value: &str) -> CommandError {
    CommandError::BadArgument {
        command,
        field,
        value: value.to_string(),
    }
}

fn int(command: &'static str, field: &'static str, token: &str) -> Result<u32, CommandError> {
    token.parse::<u32>().map_err(|_| bad(command, field, token))
}
