pub(crate) use super::{StatRecord, StatSource, StatSourceError, offense_defense};

mod support;
