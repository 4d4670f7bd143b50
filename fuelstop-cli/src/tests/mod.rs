//! Shared test harness modules for the fuelstop CLI.

use super::*;

mod helpers;
mod plan_unit;
