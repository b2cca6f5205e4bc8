//! Configuration loader — line-oriented warehouse setup file.
//!
//! Format:
//!   customer  <name> <soldier|civilian> <distance> <maxOrders>
//!   volunteer <name> <role> <cooldownOrMaxDistance> [<distancePerStep>] [<maxOrders>]
//!
//! `#` starts a comment, blank lines are ignored. A malformed line is
//! reported and skipped; parsing continues with the next line.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use warehouse_core::domain::CustomerKind;
use warehouse_core::engine::WarehouseEngine;
use warehouse_core::volunteer::VolunteerSpec;

/// One successfully parsed configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEntry {
    Customer {
        name: String,
        kind: CustomerKind,
        distance: u32,
        max_orders: u32,
    },
    Volunteer {
        name: String,
        spec: VolunteerSpec,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ConfigError {
    pub line: usize,
    pub reason: String,
}

/// Everything a configuration text yields: entries in file order plus the
/// lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    pub entries: Vec<ConfigEntry>,
    pub errors: Vec<ConfigError>,
}

impl ParsedConfig {
    /// Register every entry with `engine`, in file order.
    pub fn apply_to(&self, engine: &mut WarehouseEngine) {
        for entry in &self.entries {
            match entry {
                ConfigEntry::Customer {
                    name,
                    kind,
                    distance,
                    max_orders,
                } => {
                    engine.add_customer(name, *kind, *distance, *max_orders);
                }
                ConfigEntry::Volunteer { name, spec } => {
                    engine.add_volunteer(name, *spec);
                }
            }
        }
    }
}

/// Parse configuration text. Never fails as a whole.
pub fn parse_config(text: &str) -> ParsedConfig {
    let mut parsed = ParsedConfig::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let content = raw.split('#').next().unwrap_or("");
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match parse_line(&tokens) {
            Ok(entry) => parsed.entries.push(entry),
            Err(reason) => {
                let err = ConfigError {
                    line: line_no,
                    reason,
                };
                warn!(line = line_no, error = %err, "skipping configuration line");
                parsed.errors.push(err);
            }
        }
    }

    parsed
}

/// Read and parse a configuration file.
pub fn load_config_file(path: &Path) -> io::Result<ParsedConfig> {
    let text = fs::read_to_string(path)?;
    Ok(parse_config(&text))
}

fn parse_line(tokens: &[&str]) -> Result<ConfigEntry, String> {
    match tokens[0] {
        "customer" => parse_customer(&tokens[1..]),
        "volunteer" => parse_volunteer(&tokens[1..]),
        other => Err(format!("unknown configuration type {:?}", other)),
    }
}

fn number(token: Option<&&str>, field: &str) -> Result<u32, String> {
    let token = token.ok_or_else(|| format!("missing {}", field))?;
    token
        .parse::<u32>()
        .map_err(|_| format!("{} must be a non-negative integer, got {:?}", field, token))
}

fn expect_arity(args: &[&str], expected: usize, what: &str) -> Result<(), String> {
    if args.len() > expected {
        return Err(format!(
            "{} takes {} fields, got {}",
            what,
            expected,
            args.len()
        ));
    }
    Ok(())
}

fn parse_customer(args: &[&str]) -> Result<ConfigEntry, String> {
    expect_arity(args, 4, "customer")?;
    let name = args.first().ok_or("missing customer name")?;
    let kind_token = args.get(1).ok_or("missing customer type")?;
    let kind = CustomerKind::parse(kind_token)
        .ok_or_else(|| format!("unknown customer type {:?}", kind_token))?;
    Ok(ConfigEntry::Customer {
        name: name.to_string(),
        kind,
        distance: number(args.get(2), "distance")?,
        max_orders: number(args.get(3), "maxOrders")?,
    })
}

fn parse_volunteer(args: &[&str]) -> Result<ConfigEntry, String> {
    let name = args.first().ok_or("missing volunteer name")?;
    let role = args.get(1).ok_or("missing volunteer role")?;
    let primary = args.get(2);

    let spec = match *role {
        "collector" => {
            expect_arity(args, 3, "collector")?;
            VolunteerSpec::Collector {
                cooldown: number(primary, "cooldown")?,
            }
        }
        "limited_collector" => {
            expect_arity(args, 4, "limited_collector")?;
            VolunteerSpec::LimitedCollector {
                cooldown: number(primary, "cooldown")?,
                max_orders: number(args.get(3), "maxOrders")?,
            }
        }
        "driver" => {
            expect_arity(args, 4, "driver")?;
            VolunteerSpec::Driver {
                max_distance: number(primary, "maxDistance")?,
                distance_per_step: positive(number(args.get(3), "distancePerStep")?)?,
            }
        }
        "limited_driver" => {
            expect_arity(args, 5, "limited_driver")?;
            VolunteerSpec::LimitedDriver {
                max_distance: number(primary, "maxDistance")?,
                distance_per_step: positive(number(args.get(3), "distancePerStep")?)?,
                max_orders: number(args.get(4), "maxOrders")?,
            }
        }
        other => return Err(format!("unknown volunteer role {:?}", other)),
    };

    Ok(ConfigEntry::Volunteer {
        name: name.to_string(),
        spec,
    })
}

// A driver that covers no distance per step never finishes a delivery.
fn positive(distance_per_step: u32) -> Result<u32, String> {
    if distance_per_step == 0 {
        return Err("distancePerStep must be positive".to_string());
    }
    Ok(distance_per_step)
}
