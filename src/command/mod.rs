mod dispatch;
mod request;
mod validate;

pub use dispatch::{
    absolute_name, display_name, DispatchError, DispatchOptions, Dispatcher, OperationResult,
    Payload, ZoneNames,
};
pub use request::{Command, CommandOptions, Field, Request, RequestKind};
pub use validate::{validate, ValidationError};
