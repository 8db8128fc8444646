//! Business rules for tasks and sessions. Each submodule exposes *driving ports* (service traits
//! the API layer calls into) and *driven ports* (traits the services use to reach persistence).

pub mod session;
pub mod task;

#[cfg(test)]
pub(crate) mod test_util;
