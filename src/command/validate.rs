use thiserror::Error;

use super::request::{Command, CommandOptions, Field, Request, RequestKind};
use crate::dns::ZoneType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please specify {} ({})", .0.purpose(), .0.flag())]
    MissingArgument(Field),

    #[error("command '{0}' is not implemented")]
    NotImplemented(Command),
}

/// Check that `options` carry everything `command` needs.
///
/// Requirements are checked in a fixed order and the first missing one is
/// reported. Empty strings count as missing.
pub fn validate(command: Command, options: &CommandOptions) -> Result<Request, ValidationError> {
    let kind = match command {
        Command::ListPrimaryZones => RequestKind::ListZones {
            zone_type: ZoneType::Primary,
            name_filter: optional(&options.zone),
        },
        Command::ListSecondaryZones => RequestKind::ListZones {
            zone_type: ZoneType::Secondary,
            name_filter: optional(&options.zone),
        },
        Command::AddSecondaryZone => {
            let zone_name = require(&options.zone, Field::Zone)?;
            let primary_ns = require(&options.primary_ns, Field::PrimaryNs)?;
            RequestKind::AddSecondaryZone {
                zone_name,
                primary_ns,
            }
        }
        Command::DeleteZone => RequestKind::DeleteZone {
            zone_name: require(&options.zone, Field::Zone)?,
        },
        Command::PromoteZone => RequestKind::PromoteZone {
            zone_name: require(&options.zone, Field::Zone)?,
        },
        Command::DeleteARecord => {
            let zone_name = require(&options.zone, Field::Zone)?;
            let record_name = require(&options.a_record, Field::ARecord)?;
            RequestKind::DeleteARecord {
                zone_name,
                record_name,
            }
        }
        Command::AddWeb | Command::AddSlb | Command::AddTc => {
            return Err(ValidationError::NotImplemented(command))
        }
    };

    Ok(Request::new(kind))
}

fn optional(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

fn require(value: &Option<String>, field: Field) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::MissingArgument(field))
}
